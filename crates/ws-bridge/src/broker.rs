use crate::errors::BrokerError;
use crate::types::TopicMessage;

/// The pub/sub system the bridge sources messages from.
///
/// Implementations subscribe synchronously: `subscribe` either returns a live
/// subscription handle or an error, and the bridge treats any error at open
/// time as fatal to the whole connection attempt.
#[async_trait::async_trait]
pub trait Broker: Send + Sync + 'static {
	type Subscription: Subscription;

	/// Subscribe to a named topic.
	async fn subscribe(&self, topic: &str) -> Result<Self::Subscription, BrokerError>;
}

/// A live subscription to exactly one topic.
///
/// Messages are yielded in the broker's delivery order for that topic.
#[async_trait::async_trait]
pub trait Subscription: Send + 'static {
	/// Wait for the next message on this topic.
	///
	/// Returns `None` only when the broker-side subscription has terminated;
	/// the sequence cannot be restarted, only recreated.
	async fn next_message(&mut self) -> Option<TopicMessage>;

	/// Release the subscription. Idempotent.
	async fn close(&mut self);
}
