// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite implementation of [`KeyValueStore`].
//!
//! All keys live in one table, `data`, with raw path bytes as the primary key
//! and raw payload bytes as the value.

mod config;

use std::{fs, sync::Arc};

pub use config::{JournalMode, SqliteConfig, SynchronousMode};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::instrument;

use crate::{KeyValueStore, Result, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS data (
	key   BLOB NOT NULL PRIMARY KEY,
	value BLOB NOT NULL
)";

#[derive(Clone)]
pub struct SqliteStore {
	conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
	/// Open (or create) the database file and make sure the `data` table exists.
	#[instrument(name = "store::sqlite::open", level = "info", skip(config), fields(
		db_path = ?config.path,
		journal_mode = %config.journal_mode.as_str()
	))]
	pub fn open(config: SqliteConfig) -> Result<Self> {
		if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
				path: parent.display().to_string(),
				source,
			})?;
		}

		let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
			| OpenFlags::SQLITE_OPEN_CREATE
			| OpenFlags::SQLITE_OPEN_NO_MUTEX;
		let conn = Connection::open_with_flags(&config.path, flags)?;

		conn.pragma_update(None, "journal_mode", config.journal_mode.as_str())?;
		conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str())?;
		conn.execute_batch(SCHEMA)?;

		tracing::info!("opened sqlite store at {}", config.path.display());

		Ok(Self {
			conn: Arc::new(Mutex::new(conn)),
		})
	}

	/// Open a private in-memory database.
	pub fn in_memory() -> Result<Self> {
		let conn = Connection::open_in_memory()?;
		conn.execute_batch(SCHEMA)?;
		Ok(Self {
			conn: Arc::new(Mutex::new(conn)),
		})
	}
}

impl KeyValueStore for SqliteStore {
	#[instrument(name = "store::sqlite::get", level = "trace", skip(self), fields(key_len = key.len()))]
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		let conn = self.conn.lock();
		let value = conn
			.query_row("SELECT value FROM data WHERE key = ?1", params![key], |row| row.get::<_, Vec<u8>>(0))
			.optional()?;
		Ok(value)
	}

	#[instrument(name = "store::sqlite::put", level = "debug", skip(self, value), fields(key_len = key.len(), value_len = value.len()))]
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
		let conn = self.conn.lock();
		conn.execute(
			"INSERT INTO data (key, value) VALUES (?1, ?2)
			 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
			params![key, value],
		)?;
		Ok(())
	}

	#[instrument(name = "store::sqlite::delete", level = "debug", skip(self), fields(key_len = key.len()))]
	fn delete(&self, key: &[u8]) -> Result<()> {
		let conn = self.conn.lock();
		conn.execute("DELETE FROM data WHERE key = ?1", params![key])?;
		Ok(())
	}
}
