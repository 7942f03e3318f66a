// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use watchkv_core::{Config, StorageKind};
use watchkv_store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, sqlite::SqliteConfig};

use crate::AppError;

/// Open the store selected by `config`.
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, StoreError> {
	match config.storage {
		StorageKind::Sqlite => Ok(Arc::new(SqliteStore::open(SqliteConfig::new(config.db_path()))?)),
		StorageKind::Memory => {
			tracing::info!("using in-memory store, data will not survive a restart");
			Ok(Arc::new(MemoryStore::new()))
		}
	}
}

/// Run a store call on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
	F: FnOnce() -> Result<T, StoreError> + Send + 'static,
	T: Send + 'static,
{
	Ok(tokio::task::spawn_blocking(f).await??)
}
