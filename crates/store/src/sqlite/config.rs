// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Path, PathBuf};

/// Configuration for [`SqliteStore`](super::SqliteStore).
#[derive(Debug, Clone)]
pub struct SqliteConfig {
	/// Path of the database file. Missing parent directories are created.
	pub path: PathBuf,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
}

impl SqliteConfig {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
		}
	}

	/// Durability traded for speed, for tests.
	pub fn fast(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			journal_mode: JournalMode::Memory,
			synchronous_mode: SynchronousMode::Off,
		}
	}

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
	Memory,
	Wal,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Memory => "MEMORY",
			JournalMode::Wal => "WAL",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronousMode {
	Off,
	Normal,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
		}
	}
}
