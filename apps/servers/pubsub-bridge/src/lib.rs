use std::sync::Arc;

pub mod broker;
pub mod config;
pub mod websocket;

pub use broker::RedisBroker;
pub use config::Config;

/// Everything the websocket handler needs, built once in main and injected
/// through router state; nothing registers itself globally.
#[derive(Clone)]
pub struct AppState {
	pub settings: Arc<Config>,
	pub broker: RedisBroker,
}

impl AppState {
	pub fn build(settings: Arc<Config>) -> anyhow::Result<Self> {
		let broker = RedisBroker::connect(&settings.redis_url())?;
		Ok(Self { settings, broker })
	}
}
