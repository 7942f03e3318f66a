// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Server and request error types.
//!
//! Request errors map to bare status codes; failure details only reach the
//! log, never the client.

use std::{io, net::SocketAddr};

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use tokio::task::JoinError;
use watchkv_store::StoreError;

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("failed to bind {addr}: {source}")]
	Bind {
		addr: SocketAddr,
		#[source]
		source: io::Error,
	},

	#[error("bound address unavailable: {0}")]
	AddressUnavailable(#[source] io::Error),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Errors raised while handling a plain request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("storage error: {0}")]
	Store(#[from] StoreError),

	#[error("storage task failed: {0}")]
	Task(#[from] JoinError),

	#[error("failed to read request body: {0}")]
	Body(#[source] axum::Error),
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		match &self {
			AppError::Store(_) | AppError::Task(_) => {
				tracing::error!("{}", self);
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			}
			AppError::Body(_) => {
				tracing::warn!("{}", self);
				StatusCode::BAD_REQUEST.into_response()
			}
		}
	}
}
