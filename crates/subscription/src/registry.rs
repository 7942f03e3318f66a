// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registry of streaming connections per watched path.

use std::{collections::HashMap, sync::Arc};

use dashmap::{DashMap, mapref::entry::Entry};
use watchkv_core::Path;

use crate::{Subscriber, SubscriberId};

/// Registry tracking which subscribers watch which path.
///
/// The map is sharded by path hash, so mutations and snapshots on unrelated
/// paths rarely contend. Every operation on a path runs under that path's
/// shard lock, which means readers never observe a half-updated set and a
/// path whose last subscriber left is removed in the same critical section.
pub struct SubscriptionRegistry {
	/// path → subscriber_id → subscriber
	paths: DashMap<Path, HashMap<SubscriberId, Subscriber>>,
}

impl SubscriptionRegistry {
	pub fn new() -> Self {
		Self {
			paths: DashMap::new(),
		}
	}

	/// Attach `subscriber` to `path`, creating the path's set if absent.
	///
	/// Must be called once per subscriber lifetime, with a single path.
	pub fn register(&self, path: Path, subscriber: Subscriber) {
		let id = subscriber.id();
		tracing::debug!(%path, subscriber = %id, "registering subscriber");
		self.paths.entry(path).or_default().insert(id, subscriber);
	}

	/// Detach a subscriber, dropping the path entry once its set is empty.
	///
	/// Returns false (and does nothing) when the pair is not registered.
	pub fn unregister(&self, path: &Path, id: SubscriberId) -> bool {
		match self.paths.entry(path.clone()) {
			Entry::Occupied(mut entry) => {
				let removed = entry.get_mut().remove(&id).is_some();
				if entry.get().is_empty() {
					entry.remove();
				}
				if removed {
					tracing::debug!(%path, subscriber = %id, "unregistered subscriber");
				}
				removed
			}
			Entry::Vacant(_) => false,
		}
	}

	/// Register and return a guard that unregisters when dropped.
	pub fn subscribe(self: &Arc<Self>, path: Path, subscriber: Subscriber) -> Subscription {
		let id = subscriber.id();
		self.register(path.clone(), subscriber);
		Subscription {
			registry: Arc::clone(self),
			path,
			id,
		}
	}

	/// Copy of the subscribers currently attached to `path`.
	///
	/// The shard lock is released before this returns; callers may iterate
	/// and deliver at leisure.
	pub fn snapshot(&self, path: &Path) -> Vec<Subscriber> {
		self.paths.get(path).map(|set| set.values().cloned().collect()).unwrap_or_default()
	}

	pub fn contains(&self, path: &Path, id: SubscriberId) -> bool {
		self.paths.get(path).is_some_and(|set| set.contains_key(&id))
	}

	/// Number of subscribers attached to `path`.
	pub fn subscribers_on(&self, path: &Path) -> usize {
		self.paths.get(path).map_or(0, |set| set.len())
	}

	/// Number of paths with at least one subscriber.
	pub fn path_count(&self) -> usize {
		self.paths.len()
	}

	/// Number of subscribers across all paths.
	pub fn subscriber_count(&self) -> usize {
		self.paths.iter().map(|entry| entry.value().len()).sum()
	}

	/// Paths with at least one subscriber.
	pub fn paths(&self) -> Vec<Path> {
		self.paths.iter().map(|entry| entry.key().clone()).collect()
	}
}

impl Default for SubscriptionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Registration of one subscriber, undone when dropped.
///
/// Owned by the connection task so the subscriber is detached exactly once,
/// however the task ends.
pub struct Subscription {
	registry: Arc<SubscriptionRegistry>,
	path: Path,
	id: SubscriberId,
}

impl Subscription {
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn id(&self) -> SubscriberId {
		self.id
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.registry.unregister(&self.path, self.id);
	}
}

#[cfg(test)]
mod tests {
	use std::{collections::HashSet, thread};

	use super::*;

	#[test]
	fn test_register_unregister() {
		let registry = SubscriptionRegistry::new();
		let path = Path::from("/x");
		let (a, _ra) = Subscriber::channel(1);
		let (b, _rb) = Subscriber::channel(1);
		let (a_id, b_id) = (a.id(), b.id());

		registry.register(path.clone(), a);
		registry.register(path.clone(), b);
		assert_eq!(registry.subscribers_on(&path), 2);
		assert_eq!(registry.path_count(), 1);

		assert!(registry.unregister(&path, a_id));
		assert!(!registry.contains(&path, a_id));
		assert!(registry.contains(&path, b_id));
		assert_eq!(registry.path_count(), 1);

		assert!(registry.unregister(&path, b_id));
		assert_eq!(registry.path_count(), 0);
		assert_eq!(registry.subscriber_count(), 0);
	}

	#[test]
	fn test_unregister_unknown_is_noop() {
		let registry = SubscriptionRegistry::new();
		let path = Path::from("/x");
		let (a, _ra) = Subscriber::channel(1);
		let (stranger, _rs) = Subscriber::channel(1);

		assert!(!registry.unregister(&path, stranger.id()));
		assert_eq!(registry.path_count(), 0);

		registry.register(path.clone(), a);
		assert!(!registry.unregister(&path, stranger.id()));
		assert!(!registry.unregister(&Path::from("/y"), stranger.id()));
		assert_eq!(registry.subscribers_on(&path), 1);
		assert_eq!(registry.path_count(), 1);
	}

	#[test]
	fn test_snapshot_is_a_copy() {
		let registry = SubscriptionRegistry::new();
		let path = Path::from("/x");
		let (a, _ra) = Subscriber::channel(1);
		let a_id = a.id();
		registry.register(path.clone(), a);

		let snapshot = registry.snapshot(&path);
		registry.unregister(&path, a_id);

		assert_eq!(snapshot.len(), 1);
		assert_eq!(snapshot[0].id(), a_id);
		assert!(registry.snapshot(&path).is_empty());
	}

	#[test]
	fn test_snapshot_of_unknown_path_is_empty() {
		let registry = SubscriptionRegistry::new();
		assert!(registry.snapshot(&Path::from("/nothing")).is_empty());
		assert_eq!(registry.path_count(), 0);
	}

	#[test]
	fn test_paths_are_isolated() {
		let registry = SubscriptionRegistry::new();
		let (a, _ra) = Subscriber::channel(1);
		let (b, _rb) = Subscriber::channel(1);
		let a_id = a.id();

		registry.register(Path::from("/a"), a);
		registry.register(Path::from("/b"), b);

		assert!(!registry.unregister(&Path::from("/b"), a_id));
		assert_eq!(registry.subscribers_on(&Path::from("/a")), 1);
		assert_eq!(registry.subscribers_on(&Path::from("/b")), 1);

		let mut paths = registry.paths();
		paths.sort();
		assert_eq!(paths, vec![Path::from("/a"), Path::from("/b")]);
	}

	#[test]
	fn test_guard_unregisters_on_drop() {
		let registry = Arc::new(SubscriptionRegistry::new());
		let path = Path::from("/x");
		let (a, _ra) = Subscriber::channel(1);

		let subscription = registry.subscribe(path.clone(), a);
		assert!(registry.contains(&path, subscription.id()));
		assert_eq!(subscription.path(), &path);

		drop(subscription);
		assert_eq!(registry.path_count(), 0);
	}

	#[test]
	fn test_concurrent_register_unregister_keeps_invariants() {
		let registry = Arc::new(SubscriptionRegistry::new());
		let paths: Vec<Path> = (0..4).map(|i| Path::from(format!("/p{i}"))).collect();

		let handles: Vec<_> = (0..8)
			.map(|worker| {
				let registry = Arc::clone(&registry);
				let paths = paths.clone();
				thread::spawn(move || {
					let mut kept = Vec::new();
					for round in 0..500 {
						let path = paths[(worker + round) % paths.len()].clone();
						let (subscriber, rx) = Subscriber::channel(1);
						let id = subscriber.id();
						registry.register(path.clone(), subscriber);
						let _ = registry.snapshot(&path);
						if round % 10 == 0 {
							kept.push((path, id, rx));
						} else {
							assert!(registry.unregister(&path, id));
						}
					}
					kept
				})
			})
			.collect();

		let kept: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();

		// quiescent point: every kept subscriber appears exactly once
		assert_eq!(registry.subscriber_count(), kept.len());
		let mut seen = HashSet::new();
		for path in registry.paths() {
			let snapshot = registry.snapshot(&path);
			assert!(!snapshot.is_empty());
			for subscriber in snapshot {
				assert!(seen.insert(subscriber.id()), "subscriber listed under two paths");
			}
		}

		for (path, id, _rx) in &kept {
			assert!(registry.unregister(path, *id));
		}
		assert_eq!(registry.path_count(), 0);
	}
}
