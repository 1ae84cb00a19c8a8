use async_trait::async_trait;
use bytes::Bytes;
use redis::aio::PubSub;
use redis::Client;
use tracing::debug;
use ws_bridge::{Broker, BrokerError, Subscription, TopicMessage};

/// Redis-backed broker collaborator.
///
/// Every topic gets its own dedicated pub/sub connection: per-topic delivery
/// order is then exactly Redis's publish order, and one topic's connection
/// dying cannot take the other topics down with it.
#[derive(Clone)]
pub struct RedisBroker {
	client: Client,
}

impl RedisBroker {
	/// Build a broker handle for the given Redis URL. Connections are opened
	/// lazily, per subscription.
	pub fn connect(url: &str) -> Result<Self, BrokerError> {
		let client = Client::open(url).map_err(|e| BrokerError::Unreachable(e.to_string()))?;
		Ok(Self { client })
	}
}

#[async_trait]
impl Broker for RedisBroker {
	type Subscription = RedisSubscription;

	async fn subscribe(&self, topic: &str) -> Result<RedisSubscription, BrokerError> {
		if topic.is_empty() {
			return Err(BrokerError::InvalidTopic("topic name is empty".to_owned()));
		}

		let mut pubsub = self.client.get_async_pubsub().await.map_err(|e| BrokerError::Unreachable(e.to_string()))?;
		pubsub.subscribe(topic).await.map_err(|e| BrokerError::Other(e.to_string()))?;

		Ok(RedisSubscription {
			topic: topic.to_owned(),
			pubsub: Some(pubsub),
		})
	}
}

pub struct RedisSubscription {
	topic: String,
	pubsub: Option<PubSub>,
}

#[async_trait]
impl Subscription for RedisSubscription {
	async fn next_message(&mut self) -> Option<TopicMessage> {
		use futures::StreamExt;

		let pubsub = self.pubsub.as_mut()?;
		let msg = pubsub.on_message().next().await?;

		Some(TopicMessage::new(msg.get_channel_name().to_owned(), Bytes::copy_from_slice(msg.get_payload_bytes())))
	}

	async fn close(&mut self) {
		if let Some(mut pubsub) = self.pubsub.take() {
			if let Err(e) = pubsub.unsubscribe(&self.topic).await {
				debug!(topic = %self.topic, error = %e, "unsubscribe failed while closing");
			}
		}
	}
}
