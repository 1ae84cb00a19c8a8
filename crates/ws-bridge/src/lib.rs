//! Per-connection multiplexing engine bridging a pub/sub broker onto duplex
//! streaming connections.
//!
//! A client opens a connection and names the topics it wants; one forwarder
//! per topic fans broker messages into a single bounded outbound queue, a
//! writer loop drains that queue into the connection one frame at a time, and
//! a read-only monitor watches for the peer going away. A write failure or a
//! detected disconnect tears the whole bridge down; a single topic's broker
//! failure only silences that topic.
//!
//! The broker and the connection are collaborator seams ([`Broker`],
//! [`FrameSink`], [`FrameSource`]) so the engine runs the same against Redis
//! pub/sub over a WebSocket as against in-memory fakes in tests.

pub mod bridge;
pub mod broker;
pub mod conn;
pub mod errors;
pub mod monitor;
pub mod queue;
pub mod reader;
pub mod types;

pub use bridge::Bridge;
pub use broker::{Broker, Subscription};
pub use conn::{FrameSink, FrameSource};
pub use errors::{BridgeError, BrokerError, PeerGone, QueueClosed, SinkError};
pub use types::TopicMessage;
