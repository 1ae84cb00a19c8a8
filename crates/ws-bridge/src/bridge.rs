use crate::broker::{Broker, Subscription};
use crate::conn::{FrameSink, FrameSource};
use crate::errors::BridgeError;
use crate::monitor::spawn_close_monitor;
use crate::queue::{self, DEFAULT_CAPACITY};
use crate::reader::spawn_topic_forwarder;
use tracing::{debug, error};

/// Owns the full lifecycle of one duplex connection bridged onto a fixed set
/// of topics: Opening, Subscribing, Active, Closed. Topic membership cannot
/// change after open; there is no per-topic unsubscribe.
pub struct Bridge<B> {
	broker: B,
	capacity: usize,
}

impl<B> Bridge<B>
where
	B: Broker,
{
	pub fn new(broker: B) -> Self {
		Self {
			broker,
			capacity: DEFAULT_CAPACITY,
		}
	}

	/// Override the outbound queue capacity. Smaller capacities make the
	/// backpressure stall kick in earlier; tests use this to force saturation.
	pub fn with_capacity(broker: B, capacity: usize) -> Self {
		Self { broker, capacity }
	}

	/// Run one connection to completion.
	///
	/// Subscribing is all-or-nothing: the first failing topic aborts the whole
	/// attempt, already-made subscriptions are released, the connection is
	/// closed, and no message is ever delivered. Once active, the writer loop
	/// drains the shared queue into the sink one flushed frame at a time until
	/// a write fails or the close monitor notices the peer going away. Either
	/// way the bridge ends in the same place: queue closed, every forwarder
	/// and the monitor joined, subscriptions released, connection closed.
	pub async fn run<W, R>(&self, mut sink: W, source: R, topics: Vec<String>) -> Result<(), BridgeError>
	where
		W: FrameSink,
		R: FrameSource,
	{
		let mut subscriptions = Vec::with_capacity(topics.len());

		for topic in topics {
			match self.broker.subscribe(&topic).await {
				Ok(subscription) => subscriptions.push((topic, subscription)),
				Err(e) => {
					error!(topic = %topic, error = %e, "could not subscribe to topic");

					for (_, mut subscription) in subscriptions {
						subscription.close().await;
					}
					sink.close().await;

					return Err(BridgeError::Subscribe {
						topic,
						reason: e.to_string(),
					});
				}
			}
		}

		let (tx, mut rx) = queue::bounded(self.capacity);

		let monitor = spawn_close_monitor(source, tx.clone());

		let mut forwarders = Vec::with_capacity(subscriptions.len());
		for (topic, subscription) in subscriptions {
			debug!(topic = %topic, "subscription created");
			forwarders.push(spawn_topic_forwarder(topic, subscription, tx.clone()));
		}

		// Writer loop: the queue's single consumer. With zero topics this
		// simply waits until the close monitor closes the queue.
		let mut outcome = Ok(());
		while let Some(msg) = rx.next().await {
			if let Err(e) = sink.write_frame(msg.payload).await {
				debug!(error = %e, "could not write message to connection");
				outcome = Err(BridgeError::Write(e.to_string()));
				break;
			}
		}

		// Closed is absorbing. Close the queue before joining the forwarders so
		// a producer blocked on a full queue is released instead of stalling
		// forever; anything still in flight is dropped.
		tx.close();
		sink.close().await;

		for forwarder in forwarders {
			let _ = forwarder.await;
		}
		let _ = monitor.await;

		debug!("bridge closed");
		outcome
	}
}
