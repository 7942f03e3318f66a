// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Why a notification did not reach a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
	/// The subscriber's channel is full; the notification is dropped.
	#[error("subscriber is not keeping up, notification dropped")]
	BackPressure,
	/// The subscriber's connection task has gone away.
	#[error("subscriber has disconnected")]
	Disconnected,
}

/// Outcome of one broadcast.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
	pub delivered: usize,
	pub back_pressure: usize,
	pub disconnected: usize,
}

impl BroadcastReport {
	pub(crate) fn record(&mut self, result: Result<(), DeliveryError>) {
		match result {
			Ok(()) => self.delivered += 1,
			Err(DeliveryError::BackPressure) => self.back_pressure += 1,
			Err(DeliveryError::Disconnected) => self.disconnected += 1,
		}
	}

	/// Number of subscribers in the snapshot.
	pub fn attempted(&self) -> usize {
		self.delivered + self.back_pressure + self.disconnected
	}

	pub fn failed(&self) -> usize {
		self.back_pressure + self.disconnected
	}
}
