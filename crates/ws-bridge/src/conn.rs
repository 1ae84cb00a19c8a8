use crate::errors::{PeerGone, SinkError};
use bytes::Bytes;

/// Write half of the duplex connection. Used by exactly one task at a time.
#[async_trait::async_trait]
pub trait FrameSink: Send + 'static {
	/// Write one discrete frame containing exactly `payload`.
	///
	/// Completes only once the frame has been flushed; the bridge never starts
	/// the next write before the previous one finished.
	async fn write_frame(&mut self, payload: Bytes) -> Result<(), SinkError>;

	/// Close the connection. Idempotent.
	async fn close(&mut self);
}

/// Read half of the duplex connection.
///
/// The bridge expects no payload from the peer; this half exists so the close
/// monitor can notice the peer going away, since the protocol offers no other
/// asynchronous notification.
#[async_trait::async_trait]
pub trait FrameSource: Send + 'static {
	/// Wait for the next inbound frame, discarding its content.
	async fn next_frame(&mut self) -> Result<(), PeerGone>;
}
