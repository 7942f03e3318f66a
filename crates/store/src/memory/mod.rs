// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use crossbeam_skiplist::SkipMap;
use tracing::instrument;

use crate::{KeyValueStore, Result};

/// Volatile store, lost on restart.
#[derive(Clone)]
pub struct MemoryStore(Arc<MemoryStoreInner>);

pub struct MemoryStoreInner {
	memory: SkipMap<Vec<u8>, Vec<u8>>,
}

impl Deref for MemoryStore {
	type Target = MemoryStoreInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryStore {
	pub fn new() -> Self {
		Self(Arc::new(MemoryStoreInner {
			memory: SkipMap::new(),
		}))
	}

	pub fn len(&self) -> usize {
		self.memory.len()
	}

	pub fn is_empty(&self) -> bool {
		self.memory.is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	#[instrument(name = "store::memory::get", level = "trace", skip(self), fields(key_len = key.len()))]
	fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
		Ok(self.memory.get(key).map(|entry| entry.value().clone()))
	}

	#[instrument(name = "store::memory::put", level = "trace", skip(self, value), fields(key_len = key.len(), value_len = value.len()))]
	fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
		self.memory.insert(key.to_vec(), value.to_vec());
		Ok(())
	}

	#[instrument(name = "store::memory::delete", level = "trace", skip(self), fields(key_len = key.len()))]
	fn delete(&self, key: &[u8]) -> Result<()> {
		self.memory.remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_put_get_delete() {
		let store = MemoryStore::new();
		assert_eq!(store.get(b"/x").unwrap(), None);

		store.put(b"/x", b"hello").unwrap();
		assert_eq!(store.get(b"/x").unwrap(), Some(b"hello".to_vec()));

		store.put(b"/x", b"world").unwrap();
		assert_eq!(store.get(b"/x").unwrap(), Some(b"world".to_vec()));
		assert_eq!(store.len(), 1);

		store.delete(b"/x").unwrap();
		assert_eq!(store.get(b"/x").unwrap(), None);
		assert!(store.is_empty());
	}

	#[test]
	fn test_empty_value_is_not_absent() {
		let store = MemoryStore::new();
		store.put(b"/empty", b"").unwrap();
		assert_eq!(store.get(b"/empty").unwrap(), Some(Vec::new()));
	}

	#[test]
	fn test_delete_missing_is_ok() {
		let store = MemoryStore::new();
		store.delete(b"/missing").unwrap();
	}

	#[test]
	fn test_clones_share_state() {
		let store = MemoryStore::new();
		let other = store.clone();
		store.put(b"/shared", b"1").unwrap();
		assert_eq!(other.get(b"/shared").unwrap(), Some(b"1".to_vec()));
	}
}
