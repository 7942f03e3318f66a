// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Request classification and the plain-request pipeline.

use axum::{
	body::{Body, to_bytes},
	extract::{Request, State},
	http::{Method, StatusCode, Uri, header},
	response::{IntoResponse, Response},
};
use tracing::{debug, error};
use watchkv_core::{ChangeKind, Path, WriteNotify};

use crate::{
	error::AppError,
	state::AppState,
	storage::run_blocking,
	watch::{is_websocket_upgrade, upgrade},
};

/// Entry point for every request.
///
/// Upgrade requests become watchers of their path; everything else is
/// dispatched by method.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
	let path = resource_path(request.uri());

	if is_websocket_upgrade(request.headers()) {
		return upgrade(state, path, request).await;
	}

	let (parts, body) = request.into_parts();
	match parts.method {
		Method::GET => get(&state, path).await,
		Method::PUT | Method::POST => put(&state, path, body).await.into_response(),
		Method::DELETE => delete(&state, path).await.into_response(),
		method => {
			debug!(%method, %path, "method not allowed");
			StatusCode::METHOD_NOT_ALLOWED.into_response()
		}
	}
}

/// Percent-decoded request path. Malformed escapes are kept as written.
fn resource_path(uri: &Uri) -> Path {
	Path::from(urlencoding::decode_binary(uri.path().as_bytes()).into_owned())
}

/// Return the stored payload. A storage failure reads as not found.
async fn get(state: &AppState, path: Path) -> Response {
	debug!(%path, "GET");
	let store = state.store();
	let key = path.clone();

	match run_blocking(move || store.get(&key)).await {
		Ok(Some(value)) => ([(header::CONTENT_TYPE, "application/octet-stream")], value).into_response(),
		Ok(None) => StatusCode::NOT_FOUND.into_response(),
		Err(e) => {
			error!(%path, "failed to read value: {}", e);
			StatusCode::NOT_FOUND.into_response()
		}
	}
}

async fn put(state: &AppState, path: Path, body: Body) -> Result<StatusCode, AppError> {
	let registry = state.registry();
	let limit = state.config().max_body_size;

	match state.config().write_notify {
		WriteNotify::Compat => {
			// both tokens go out before the write commits, whatever its outcome
			debug!(%path, "SET");
			registry.broadcast(&path, ChangeKind::Set);
			let payload = to_bytes(body, limit).await.map_err(AppError::Body)?;
			debug!(%path, "DEL");
			registry.broadcast(&path, ChangeKind::Delete);
			store(state, &path, payload.to_vec()).await?;
		}
		WriteNotify::Commit => {
			let payload = to_bytes(body, limit).await.map_err(AppError::Body)?;
			store(state, &path, payload.to_vec()).await?;
			debug!(%path, "SET");
			registry.broadcast(&path, ChangeKind::Set);
		}
	}

	Ok(StatusCode::OK)
}

async fn store(state: &AppState, path: &Path, payload: Vec<u8>) -> Result<(), AppError> {
	let store = state.store();
	let key = path.clone();
	run_blocking(move || store.put(&key, &payload)).await
}

async fn delete(state: &AppState, path: Path) -> Result<StatusCode, AppError> {
	debug!(%path, "DELETE");
	let store = state.store();
	run_blocking(move || store.delete(&path)).await?;
	Ok(StatusCode::OK)
}
