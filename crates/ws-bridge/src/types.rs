use bytes::Bytes;

/// A single message delivered by the broker on one topic.
///
/// Immutable once created; clones are cheap because the payload is refcounted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicMessage {
	pub topic: String,
	pub payload: Bytes,
}

impl TopicMessage {
	pub fn new(topic: impl Into<String>, payload: impl Into<Bytes>) -> Self {
		Self {
			topic: topic.into(),
			payload: payload.into(),
		}
	}
}
