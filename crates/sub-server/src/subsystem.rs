// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Server lifecycle: bind, serve, and graceful shutdown.

use std::{
	net::SocketAddr,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use tokio::{
	net::TcpListener,
	sync::{oneshot, watch},
	time::{Instant, sleep},
};
use watchkv_core::Config;
use watchkv_store::KeyValueStore;
use watchkv_subscription::SubscriptionRegistry;

use crate::{error::ServerError, routes::router, state::AppState};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// The watchkv server.
///
/// Plain requests and watchers share one listener. Shutting down stops
/// accepting connections, closes every watcher and waits for them to
/// detach.
pub struct Server {
	config: Config,
	store: Arc<dyn KeyValueStore>,
	registry: Arc<SubscriptionRegistry>,
	/// Actual bound address (available after start).
	actual_addr: Option<SocketAddr>,
	/// State handed to the router, kept for the watcher count.
	state: Option<AppState>,
	running: Arc<AtomicBool>,
	shutdown_tx: Option<watch::Sender<bool>>,
	shutdown_complete_rx: Option<oneshot::Receiver<()>>,
}

impl Server {
	pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
		Self {
			config,
			store,
			registry: Arc::new(SubscriptionRegistry::new()),
			actual_addr: None,
			state: None,
			running: Arc::new(AtomicBool::new(false)),
			shutdown_tx: None,
			shutdown_complete_rx: None,
		}
	}

	/// Bind the listener and start serving in the background.
	///
	/// Returns the bound address. Calling it again while running returns
	/// the same address.
	pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
		if let Some(addr) = self.actual_addr.filter(|_| self.is_running()) {
			return Ok(addr);
		}

		let addr = self.config.bind_addr();
		let listener = TcpListener::bind(addr).await.map_err(|source| ServerError::Bind {
			addr,
			source,
		})?;
		let actual_addr = listener.local_addr().map_err(ServerError::AddressUnavailable)?;
		tracing::info!(config = ?self.config, "server bound to {}", actual_addr);

		let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
		let (complete_tx, complete_rx) = oneshot::channel();

		let state = AppState::new(
			self.config.clone(),
			Arc::clone(&self.store),
			Arc::clone(&self.registry),
			shutdown_rx.clone(),
		);
		let app = router(state.clone());
		let running = Arc::clone(&self.running);
		running.store(true, Ordering::SeqCst);

		tokio::spawn(async move {
			let server = axum::serve(listener, app).with_graceful_shutdown(async move {
				let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
				tracing::info!("server received shutdown signal");
			});

			if let Err(e) = server.await {
				tracing::error!("server error: {}", e);
			}

			running.store(false, Ordering::SeqCst);
			let _ = complete_tx.send(());
			tracing::info!("server stopped");
		});

		self.actual_addr = Some(actual_addr);
		self.state = Some(state);
		self.shutdown_tx = Some(shutdown_tx);
		self.shutdown_complete_rx = Some(complete_rx);
		Ok(actual_addr)
	}

	/// Stop accepting connections and detach every watcher.
	pub async fn shutdown(&mut self) {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(true);
		}
		if let Some(rx) = self.shutdown_complete_rx.take() {
			let _ = rx.await;
		}

		let Some(state) = self.state.as_ref() else {
			return;
		};

		let deadline = Instant::now() + DRAIN_TIMEOUT;
		loop {
			let remaining = state.active_watchers();
			if remaining == 0 {
				break;
			}
			if Instant::now() >= deadline {
				tracing::warn!("shutdown timeout with {} watchers still attached", remaining);
				break;
			}
			sleep(Duration::from_millis(10)).await;
		}
	}

	/// Get the actual bound address (available after start).
	pub fn local_addr(&self) -> Option<SocketAddr> {
		self.actual_addr
	}

	/// Get the actual bound port (available after start).
	pub fn port(&self) -> Option<u16> {
		self.local_addr().map(|a| a.port())
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
		&self.registry
	}

	/// Number of attached watchers, zero before the first start.
	pub fn active_watchers(&self) -> usize {
		self.state.as_ref().map_or(0, AppState::active_watchers)
	}
}

#[cfg(test)]
mod tests {
	use std::{
		io,
		sync::{Arc, Mutex},
	};

	use watchkv_store::MemoryStore;

	use super::*;

	#[derive(Clone, Default)]
	struct Captured(Arc<Mutex<Vec<u8>>>);

	impl io::Write for Captured {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn test_start_logs_effective_config() {
		let captured = Captured::default();
		let writer = captured.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();
		let _default = tracing::subscriber::set_default(subscriber);

		let config = Config {
			bind_host: "127.0.0.1".parse().unwrap(),
			port: 0,
			watch_buffer: 7,
			..Config::default()
		};
		let mut server = Server::new(config, Arc::new(MemoryStore::new()));
		let addr = server.start().await.unwrap();
		server.shutdown().await;

		let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
		assert!(output.contains(&format!("server bound to {addr}")), "{output}");
		assert!(output.contains("watch_buffer: 7"), "{output}");
	}
}
