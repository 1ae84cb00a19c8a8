use anyhow::Result;
use axum::Router;
use clap::Parser;
use pubsub_bridge::{websocket, AppState, Config};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
	let config = Config::parse();
	init_tracing(&config);

	let state = AppState::build(Arc::new(config.clone()))?;

	let app = Router::new().merge(websocket::router()).with_state(state).layer(TraceLayer::new_for_http());

	let listener = TcpListener::bind(&config.listen).await?;
	tracing::info!(addr = %listener.local_addr()?, "listening");

	let shutdown_token = CancellationToken::new();
	let signal_token = shutdown_token.clone();
	tokio::spawn(async move {
		tokio::signal::ctrl_c().await.ok();
		tracing::info!("received ctrl-c, initiating shutdown");
		signal_token.cancel();
	});

	let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).with_graceful_shutdown(async move {
		shutdown_token.cancelled().await;
	});

	server.await?;
	tracing::info!("server stopped");

	Ok(())
}

fn init_tracing(config: &Config) {
	use tracing_subscriber::layer::SubscriberExt;
	use tracing_subscriber::util::SubscriberInitExt;
	use tracing_subscriber::Layer;

	let filter = EnvFilter::new(&config.rust_log);

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(tracing_subscriber::fmt::layer().with_filter(filter))
		})
		.init();
}
