// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Streaming watchers.
//!
//! An upgraded connection watches exactly the path it was opened on. It
//! receives one text frame per change event (`SET` or `DELETE`) and is
//! unregistered once the connection ends, whatever the reason.

use std::time::Duration;

use axum::{
	extract::{
		FromRequestParts, Request,
		ws::{Message, WebSocket, WebSocketUpgrade},
	},
	http::{HeaderMap, header},
	response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio::time::{Instant, sleep_until, timeout};
use tracing::{debug, info, trace, warn};
use watchkv_core::Path;
use watchkv_subscription::Subscriber;

use crate::state::AppState;

/// Whether the request asks to switch to the streaming protocol.
pub fn is_websocket_upgrade(headers: &HeaderMap) -> bool {
	has_token(headers, header::CONNECTION, "upgrade") && has_token(headers, header::UPGRADE, "websocket")
}

fn has_token(headers: &HeaderMap, name: header::HeaderName, token: &str) -> bool {
	headers
		.get_all(name)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(','))
		.any(|candidate| candidate.trim().eq_ignore_ascii_case(token))
}

/// Complete the handshake and attach a watcher to `path`.
///
/// A failed handshake answers with the rejection and registers nothing.
pub async fn upgrade(state: AppState, path: Path, request: Request) -> Response {
	let (mut parts, _body) = request.into_parts();

	let upgrade = match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
		Ok(upgrade) => upgrade,
		Err(rejection) => {
			warn!(%path, "websocket upgrade rejected: {}", rejection);
			return rejection.into_response();
		}
	};

	let failed = path.clone();
	upgrade
		.on_failed_upgrade(move |e| warn!(path = %failed, "websocket upgrade failed: {}", e))
		.on_upgrade(move |socket| serve(socket, path, state))
}

/// Upper bound on sending the close frame to a peer that is not reading.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
enum Detach {
	Closed,
	Errored,
	Idle,
	Shutdown,
}

async fn serve(socket: WebSocket, path: Path, state: AppState) {
	let _guard = state.watcher_guard();
	let mut shutdown = state.shutdown();
	let idle_timeout = state.config().watch_idle_timeout;

	let (subscriber, mut events) = Subscriber::channel(state.config().watch_buffer);
	let subscription = state.registry().subscribe(path.clone(), subscriber);
	let id = subscription.id();
	info!(%path, %id, "watcher attached");

	let (mut sink, mut stream) = socket.split();
	let mut last_seen = Instant::now();

	let stopping = *shutdown.borrow_and_update();
	let reason = if stopping {
		Detach::Shutdown
	} else {
		loop {
			tokio::select! {
				biased;

				changed = shutdown.changed() => {
					let stopping = changed.is_err() || *shutdown.borrow();
					if stopping {
						break Detach::Shutdown;
					}
				}

				Some(event) = events.recv() => {
					let frame = Message::Text(event.kind.as_str().into());
					// a peer that stopped reading must not hold up shutdown
					tokio::select! {
						biased;

						_ = shutdown.changed() => break Detach::Shutdown,

						sent = sink.send(frame) => {
							if let Err(e) = sent {
								warn!(%path, %id, "failed to send {}: {}", event.kind, e);
							}
						}
					}
				}

				frame = stream.next() => match frame {
					Some(Ok(Message::Close(_))) | None => break Detach::Closed,
					Some(Ok(_)) => {
						last_seen = Instant::now();
						trace!(%path, %id, "inbound frame ignored");
					}
					Some(Err(e)) => {
						debug!(%path, %id, "read failed: {}", e);
						break Detach::Errored;
					}
				},

				_ = idle_expired(last_seen, idle_timeout) => break Detach::Idle,
			}
		}
	};

	drop(subscription);
	if timeout(CLOSE_TIMEOUT, sink.close()).await.is_err() {
		debug!(%path, %id, "close handshake timed out");
	}
	info!(%path, %id, ?reason, "watcher detached");
}

async fn idle_expired(last_seen: Instant, timeout: Option<Duration>) {
	match timeout {
		Some(timeout) => sleep_until(last_seen + timeout).await,
		None => std::future::pending().await,
	}
}
