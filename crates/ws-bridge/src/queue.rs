use crate::errors::QueueClosed;
use crate::types::TopicMessage;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::debug;

/// Capacity of the outbound queue unless a bridge overrides it.
pub const DEFAULT_CAPACITY: usize = 10;

/// Create the bounded outbound queue for one bridge.
///
/// Many producers (one per topic, plus the close monitor holding a handle for
/// teardown), exactly one consumer. `close` on any handle is idempotent and
/// safe to race with in-flight enqueues: a producer blocked on a full queue is
/// released with its message discarded, and the consumer still drains whatever
/// was buffered before observing end-of-queue.
pub fn bounded(capacity: usize) -> (QueueSender, QueueReceiver) {
	let (tx, rx) = mpsc::channel(capacity);
	let closed = CancellationToken::new();

	(
		QueueSender { tx, closed: closed.clone() },
		QueueReceiver { rx, closed },
	)
}

/// Producer handle onto the outbound queue.
#[derive(Clone)]
pub struct QueueSender {
	tx: mpsc::Sender<TopicMessage>,
	closed: CancellationToken,
}

impl QueueSender {
	/// Enqueue one message, waiting for capacity if the queue is full.
	///
	/// Waiting here is the backpressure mechanism: a slow connection write
	/// stalls the producing topic rather than growing memory. The wait ends
	/// early if the queue is closed, in which case the message is discarded.
	pub async fn push(&self, msg: TopicMessage) -> Result<(), QueueClosed> {
		let topic = msg.topic.clone();
		tokio::select! {
			biased;
			() = self.closed.cancelled() => {
				debug!(topic = %topic, "queue closed, discarding message");
				Err(QueueClosed)
			}
			sent = self.tx.send(msg) => sent.map_err(|_| QueueClosed),
		}
	}

	/// Close the queue. Idempotent; safe to call from any task at any time.
	pub fn close(&self) {
		self.closed.cancel();
	}

	pub fn is_closed(&self) -> bool {
		self.closed.is_cancelled()
	}

	/// Resolves once the queue has been closed.
	pub fn closed(&self) -> WaitForCancellationFuture<'_> {
		self.closed.cancelled()
	}
}

/// Consumer side of the outbound queue. At most one exists per bridge.
pub struct QueueReceiver {
	rx: mpsc::Receiver<TopicMessage>,
	closed: CancellationToken,
}

impl QueueReceiver {
	/// Take the next queued message.
	///
	/// Returns `None` once the queue is closed and fully drained, or once
	/// every sender has gone away.
	pub async fn next(&mut self) -> Option<TopicMessage> {
		tokio::select! {
			msg = self.rx.recv() => msg,
			() = self.closed.cancelled() => {
				// Refuse new messages, then hand out what is already buffered.
				self.rx.close();
				self.rx.recv().await
			}
		}
	}

	/// Close the queue from the consumer side. Idempotent.
	pub fn close(&self) {
		self.closed.cancel();
	}
}
