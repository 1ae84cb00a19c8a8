use crate::conn::FrameSource;
use crate::queue::QueueSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn the close monitor for one connection.
///
/// Read-only surveillance of the inbound half: it never writes, it only keeps
/// reading and treats the first read failure of any kind as "peer gone", at
/// which point it closes the outbound queue exactly once and stops. It also
/// stops when the queue is closed from the write side, so teardown triggered
/// by a write failure does not leave this task waiting on a silent peer.
pub fn spawn_close_monitor<R>(mut source: R, queue: QueueSender) -> JoinHandle<()>
where
	R: FrameSource,
{
	tokio::spawn(async move {
		loop {
			tokio::select! {
				() = queue.closed() => break,
				read = source.next_frame() => {
					if read.is_err() {
						debug!("detected peer close");
						queue.close();
						break;
					}
					// Inbound frames carry nothing the bridge acts on.
				}
			}
		}
	})
}
