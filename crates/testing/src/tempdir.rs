// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scratch directories for tests that touch the filesystem.

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// A uniquely named directory under the system temp dir, removed on drop.
///
/// Removal also happens while unwinding, so a failing assertion does not
/// leave database files behind.
#[derive(Debug)]
pub struct TempDir {
	path: PathBuf,
}

impl TempDir {
	pub fn new() -> io::Result<Self> {
		let path = env::temp_dir().join(format!("watchkv-{}", Uuid::new_v4()));
		fs::create_dir(&path)?;
		Ok(Self {
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

/// Run `f` against a fresh [`TempDir`].
pub fn temp_dir<F>(f: F) -> io::Result<()>
where
	F: FnOnce(&Path) -> io::Result<()>,
{
	let dir = TempDir::new()?;
	f(dir.path())
}

#[cfg(test)]
mod tests {
	use std::panic;

	use super::*;

	#[test]
	fn test_removed_after_use() {
		let mut seen = PathBuf::new();
		temp_dir(|dir| {
			fs::write(dir.join("store.db"), b"data")?;
			seen = dir.to_path_buf();
			Ok(())
		})
		.unwrap();

		assert!(!seen.as_os_str().is_empty());
		assert!(!seen.exists());
	}

	#[test]
	fn test_removed_on_panic() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().to_path_buf();

		let result = panic::catch_unwind(move || {
			let _dir = dir;
			panic!("assertion failed inside test");
		});

		assert!(result.is_err());
		assert!(!path.exists());
	}

	#[test]
	fn test_names_are_unique() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		assert_ne!(a.path(), b.path());
	}
}
