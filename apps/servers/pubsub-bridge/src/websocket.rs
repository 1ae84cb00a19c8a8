use crate::AppState;
use axum::{
	extract::{
		ws::{Message, WebSocket, WebSocketUpgrade},
		ConnectInfo, Query, State,
	},
	http::{header, HeaderMap, StatusCode},
	response::IntoResponse,
	routing::get,
	Router,
};
use bytes::Bytes;
use futures::{
	sink::SinkExt,
	stream::{SplitSink, SplitStream, StreamExt},
};
use std::net::SocketAddr;
use tracing::{debug, info, warn};
use ws_bridge::{Bridge, FrameSink, FrameSource, PeerGone, SinkError};

/// Query key clients use to name topics: `/ws?t=a&t=b`. Absent key means
/// zero topics, which is a valid (if quiet) connection.
const TOPIC_PARAM: &str = "t";

pub fn router() -> Router<AppState> {
	Router::new().route("/ws", get(websocket_handler))
}

fn topics_from_query(params: &[(String, String)]) -> Vec<String> {
	params.iter().filter(|(key, _)| key == TOPIC_PARAM).map(|(_, value)| value.clone()).collect()
}

/// Same-host origin policy for browser clients. Requests without an Origin
/// header (curl, native clients) pass; requests with one must match the Host
/// the client connected to.
fn origin_allowed(headers: &HeaderMap) -> bool {
	let Some(origin) = headers.get(header::ORIGIN).and_then(|value| value.to_str().ok()) else {
		return true;
	};
	let Some(host) = headers.get(header::HOST).and_then(|value| value.to_str().ok()) else {
		return false;
	};

	origin.split_once("://").map(|(_, origin_host)| origin_host.trim_end_matches('/')).is_some_and(|origin_host| origin_host == host)
}

async fn websocket_handler(
	ws: WebSocketUpgrade,
	State(state): State<AppState>,
	ConnectInfo(addr): ConnectInfo<SocketAddr>,
	Query(params): Query<Vec<(String, String)>>,
	headers: HeaderMap,
) -> impl IntoResponse {
	if !state.settings.disable_origin_check && !origin_allowed(&headers) {
		warn!(addr = %addr, "rejecting websocket upgrade: origin not allowed");
		return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
	}

	let topics = topics_from_query(&params);
	info!(addr = %addr, topics = ?topics, "incoming websocket request");

	ws.on_upgrade(move |socket| handle_socket(socket, state, topics))
}

/// Hand the upgraded socket to the bridge and let it own the lifecycle.
async fn handle_socket(socket: WebSocket, state: AppState, topics: Vec<String>) {
	let (sender, receiver) = socket.split();

	match Bridge::new(state.broker).run(WsSink(sender), WsSource(receiver), topics).await {
		Ok(()) => debug!("websocket closed"),
		Err(e) => debug!(error = %e, "websocket closed with error"),
	}
}

struct WsSink(SplitSink<WebSocket, Message>);

#[async_trait::async_trait]
impl FrameSink for WsSink {
	async fn write_frame(&mut self, payload: Bytes) -> Result<(), SinkError> {
		// One text frame per message, payload bytes passed through untouched.
		// A payload that is not valid UTF-8 cannot legally ride in a text
		// frame, so it goes out binary rather than being re-encoded.
		let frame = match String::from_utf8(payload.to_vec()) {
			Ok(text) => Message::Text(text),
			Err(raw) => Message::Binary(raw.into_bytes()),
		};

		self.0.send(frame).await.map_err(|e| SinkError(e.to_string()))
	}

	async fn close(&mut self) {
		let _ = self.0.close().await;
	}
}

struct WsSource(SplitStream<WebSocket>);

#[async_trait::async_trait]
impl FrameSource for WsSource {
	async fn next_frame(&mut self) -> Result<(), PeerGone> {
		// Graceful close, reset, protocol error: all the same to the bridge.
		match self.0.next().await {
			Some(Ok(_)) => Ok(()),
			Some(Err(_)) | None => Err(PeerGone),
		}
	}
}
