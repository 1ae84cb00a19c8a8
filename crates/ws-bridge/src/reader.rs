use crate::broker::Subscription;
use crate::queue::QueueSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn the forwarding task for one topic subscription.
///
/// Forwards every delivered message into the shared outbound queue in broker
/// order. The task ends when the broker-side subscription terminates (local to
/// this topic; the bridge stays up) or when the queue closes (bridge
/// teardown); the subscription handle is released on every exit path.
pub fn spawn_topic_forwarder<S>(topic: String, mut subscription: S, queue: QueueSender) -> JoinHandle<()>
where
	S: Subscription,
{
	tokio::spawn(async move {
		loop {
			tokio::select! {
				() = queue.closed() => break,
				next = subscription.next_message() => match next {
					Some(msg) => {
						debug!(topic = %msg.topic, bytes = msg.payload.len(), "received message for topic");
						if queue.push(msg).await.is_err() {
							break;
						}
					}
					None => {
						debug!(topic = %topic, "broker subscription ended");
						break;
					}
				},
			}
		}

		subscription.close().await;
		debug!(topic = %topic, "topic forwarder stopped");
	})
}
