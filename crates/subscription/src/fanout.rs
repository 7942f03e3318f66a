// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use watchkv_core::{ChangeEvent, ChangeKind, Path};

use crate::{BroadcastReport, SubscriptionRegistry};

impl SubscriptionRegistry {
	/// Push `kind` to every subscriber of `path`.
	///
	/// Never blocks on a subscriber and never fails: undeliverable
	/// notifications are logged and dropped. Subscribers are not unregistered
	/// here; that is left to their connection task.
	pub fn broadcast(&self, path: &Path, kind: ChangeKind) -> BroadcastReport {
		let subscribers = self.snapshot(path);
		let mut report = BroadcastReport::default();
		if subscribers.is_empty() {
			return report;
		}

		let event = ChangeEvent::new(kind, path.clone());
		for subscriber in subscribers {
			let result = subscriber.deliver(event.clone());
			if let Err(e) = result {
				tracing::warn!(%path, subscriber = %subscriber.id(), %kind, "failed to notify subscriber: {}", e);
			}
			report.record(result);
		}

		tracing::debug!(
			%path,
			%kind,
			delivered = report.delivered,
			failed = report.failed(),
			"broadcast change"
		);
		report
	}
}
