use thiserror::Error;

/// Errors that end a bridge, or prevent one from starting.
#[derive(Error, Debug)]
pub enum BridgeError {
	/// A requested topic could not be subscribed at open time. The whole
	/// connection-open attempt is aborted; no partial bridge is left running.
	#[error("could not subscribe to topic {topic}: {reason}")]
	Subscribe { topic: String, reason: String },

	/// Writing a frame to the connection failed. Fatal to the whole bridge.
	#[error("could not write message to connection: {0}")]
	Write(String),
}

/// Error raised by a broker collaborator when a subscription cannot be created.
#[derive(Error, Debug, Clone)]
pub enum BrokerError {
	#[error("broker unreachable: {0}")]
	Unreachable(String),

	#[error("invalid topic: {0}")]
	InvalidTopic(String),

	#[error("broker error: {0}")]
	Other(String),
}

/// The outbound queue was closed; the message being enqueued was discarded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("outbound queue closed")]
pub struct QueueClosed;

/// A connection write failed.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct SinkError(pub String);

/// The remote peer is gone. Graceful close, reset and protocol errors are
/// deliberately not distinguished; the bridge reacts to all of them the same way.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("peer closed the connection")]
pub struct PeerGone;
