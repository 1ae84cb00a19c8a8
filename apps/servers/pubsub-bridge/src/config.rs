use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pubsub-bridge")]
#[command(about = "Small bridge between redis pub sub & websockets", long_about = None)]
pub struct Config {
	/// Redis server address
	#[arg(long, env = "REDIS_ADDR", default_value = "localhost:6379")]
	pub redis_addr: String,

	/// Listen address
	#[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
	pub listen: String,

	/// Disable websocket upgrade origin check (for dev)
	#[arg(long, default_value_t = false)]
	pub disable_origin_check: bool,

	/// Emit logs as JSON
	#[arg(long, env = "LOG_JSON", default_value_t = false)]
	pub log_json: bool,

	/// Log filter, e.g. "info" or "pubsub_bridge=debug,ws_bridge=debug"
	#[arg(long, env = "RUST_LOG", default_value = "debug")]
	pub rust_log: String,
}

impl Config {
	/// The `redis` crate wants a URL; bare host:port addresses get the scheme
	/// prepended so `--redis-addr localhost:6379` keeps working.
	pub fn redis_url(&self) -> String {
		if self.redis_addr.contains("://") {
			self.redis_addr.clone()
		} else {
			format!("redis://{}", self.redis_addr)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bare_address_becomes_url() {
		let config = Config::parse_from(["pubsub-bridge", "--redis-addr", "cache.internal:6380"]);
		assert_eq!(config.redis_url(), "redis://cache.internal:6380");
	}

	#[test]
	fn test_full_url_passes_through() {
		let config = Config::parse_from(["pubsub-bridge", "--redis-addr", "redis://user:pw@host:6379/0"]);
		assert_eq!(config.redis_url(), "redis://user:pw@host:6379/0");
	}

	#[test]
	fn test_defaults() {
		let config = Config::parse_from(["pubsub-bridge"]);
		assert_eq!(config.redis_addr, "localhost:6379");
		assert_eq!(config.listen, "0.0.0.0:8080");
		assert!(!config.disable_origin_check);
	}
}
