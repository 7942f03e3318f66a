// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Key-value storage for watchkv.
//!
//! A single namespace of opaque byte keys to opaque byte values. Every call is
//! atomic on its own; there are no multi-key transactions. Absence of a key
//! (`Ok(None)`) is distinct from an empty value (`Ok(Some(vec![]))`).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("failed to prepare data directory {path}: {source}")]
	DataDir {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("sqlite error: {0}")]
	Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage adapter shared by every request handler.
pub trait KeyValueStore: Send + Sync + 'static {
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

	/// Store `value` under `key`, replacing any prior value.
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

	/// Remove `key`. Removing an absent key succeeds.
	fn delete(&self, key: &[u8]) -> Result<()>;
}
