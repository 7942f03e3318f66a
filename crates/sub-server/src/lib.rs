// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! HTTP and WebSocket server for watchkv.
//!
//! Every path is both a storage key and a subscription topic:
//!
//! - `GET <path>` - stored payload, or 404
//! - `PUT <path>` / `POST <path>` - store the request body
//! - `DELETE <path>` - remove the stored payload
//! - WebSocket upgrade on `<path>` - receive a `SET` / `DELETE` text frame
//!   whenever `<path>` is written
//!
//! Any other method answers 405.
//!
//! # Example
//!
//! ```ignore
//! use watchkv_core::Config;
//! use watchkv_sub_server::{Server, open_store};
//!
//! let config = Config::from_env()?;
//! let store = open_store(&config)?;
//!
//! let mut server = Server::new(config, store);
//! server.start().await?;
//! // Server is now accepting connections
//!
//! server.shutdown().await;
//! // Server has stopped, watchers detached
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod storage;
pub mod subsystem;
pub mod watch;

pub use error::{AppError, ServerError};
pub use routes::router;
pub use state::AppState;
pub use storage::open_store;
pub use subsystem::Server;
