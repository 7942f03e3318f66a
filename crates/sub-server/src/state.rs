// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use tokio::sync::watch;
use watchkv_core::Config;
use watchkv_store::KeyValueStore;
use watchkv_subscription::SubscriptionRegistry;

/// State shared by every request handler and streaming connection.
///
/// Cloning is cheap; all clones refer to the same store and registry.
#[derive(Clone)]
pub struct AppState {
	config: Arc<Config>,
	store: Arc<dyn KeyValueStore>,
	registry: Arc<SubscriptionRegistry>,
	/// Count of live streaming connections.
	watchers: Arc<AtomicUsize>,
	/// Flips to true when the server shuts down.
	shutdown: watch::Receiver<bool>,
}

impl AppState {
	pub fn new(
		config: Config,
		store: Arc<dyn KeyValueStore>,
		registry: Arc<SubscriptionRegistry>,
		shutdown: watch::Receiver<bool>,
	) -> Self {
		Self {
			config: Arc::new(config),
			store,
			registry,
			watchers: Arc::new(AtomicUsize::new(0)),
			shutdown,
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn store(&self) -> Arc<dyn KeyValueStore> {
		Arc::clone(&self.store)
	}

	pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
		&self.registry
	}

	pub fn shutdown(&self) -> watch::Receiver<bool> {
		self.shutdown.clone()
	}

	pub fn active_watchers(&self) -> usize {
		self.watchers.load(Ordering::SeqCst)
	}

	pub(crate) fn watcher_guard(&self) -> WatcherGuard {
		self.watchers.fetch_add(1, Ordering::SeqCst);
		WatcherGuard(Arc::clone(&self.watchers))
	}
}

/// Keeps a streaming connection counted while alive.
pub(crate) struct WatcherGuard(Arc<AtomicUsize>);

impl Drop for WatcherGuard {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}
