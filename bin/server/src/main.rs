// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::process::ExitCode;

use tracing::{error, info};
use watchkv_core::Config;
use watchkv_sub_server::{Server, open_store};
use watchkv_sub_tracing::TracingBuilder;

#[tokio::main]
async fn main() -> ExitCode {
	let config = match Config::from_env() {
		Ok(config) => config,
		Err(e) => {
			eprintln!("invalid configuration: {e}");
			return ExitCode::FAILURE;
		}
	};

	TracingBuilder::new().format(config.log_format).init();

	let store = match open_store(&config) {
		Ok(store) => store,
		Err(e) => {
			error!("failed to open store at {}: {}", config.db_path().display(), e);
			return ExitCode::FAILURE;
		}
	};

	let mut server = Server::new(config, store);
	let addr = match server.start().await {
		Ok(addr) => addr,
		Err(e) => {
			error!("failed to start server: {}", e);
			return ExitCode::FAILURE;
		}
	};
	info!("listening on {}", addr);

	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("failed to listen for shutdown signal: {}", e);
	}

	info!("shutting down");
	server.shutdown().await;
	ExitCode::SUCCESS
}
