// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Waiting on state owned by background tasks, such as the registry after a
//! socket closes.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval, timeout};

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Poll `condition` every `every` until it holds or `within` has passed.
///
/// Returns whether the condition was observed.
pub async fn poll_until<F>(mut condition: F, within: Duration, every: Duration) -> bool
where
	F: FnMut() -> bool,
{
	let polling = async {
		let mut ticks = interval(every);
		ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
		loop {
			ticks.tick().await;
			if condition() {
				return;
			}
		}
	};
	timeout(within, polling).await.is_ok()
}

/// Wait up to [`WAIT_TIMEOUT`] for `condition`.
///
/// # Panics
/// Panics with `message` if the condition never holds.
pub async fn wait_for<F>(condition: F, message: &str)
where
	F: FnMut() -> bool,
{
	if !poll_until(condition, WAIT_TIMEOUT, POLL_INTERVAL).await {
		panic!("not satisfied within {WAIT_TIMEOUT:?}: {message}");
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	};

	use tokio::time::sleep;

	use super::*;

	#[tokio::test]
	async fn test_holds_immediately() {
		let mut calls = 0;
		let counted = || {
			calls += 1;
			true
		};
		assert!(poll_until(counted, WAIT_TIMEOUT, POLL_INTERVAL).await);
		assert_eq!(calls, 1);
	}

	#[tokio::test]
	async fn test_observes_background_change() {
		let flag = Arc::new(AtomicBool::new(false));
		let setter = Arc::clone(&flag);
		tokio::spawn(async move {
			sleep(Duration::from_millis(20)).await;
			setter.store(true, Ordering::SeqCst);
		});

		wait_for(|| flag.load(Ordering::SeqCst), "flag never set").await;
	}

	#[tokio::test]
	async fn test_gives_up_after_timeout() {
		assert!(!poll_until(|| false, Duration::from_millis(10), POLL_INTERVAL).await);
	}
}
