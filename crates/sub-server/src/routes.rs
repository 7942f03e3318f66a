// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{handlers::dispatch, state::AppState};

/// Build the router. Every path lands in [`dispatch`].
pub fn router(state: AppState) -> Router {
	Router::new().fallback(dispatch).layer(TraceLayer::new_for_http()).with_state(state)
}
