// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;
use watchkv_core::ChangeEvent;

use crate::DeliveryError;

/// Unique identifier of one streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Display for SubscriberId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Handle to one attached streaming connection.
///
/// Cloning is cheap; the registry hands out clones in snapshots. The
/// connection task holds the receiving end of the channel.
#[derive(Debug, Clone)]
pub struct Subscriber {
	id: SubscriberId,
	sender: mpsc::Sender<ChangeEvent>,
}

impl Subscriber {
	pub fn new(sender: mpsc::Sender<ChangeEvent>) -> Self {
		Self {
			id: SubscriberId::generate(),
			sender,
		}
	}

	/// Create a subscriber together with the receiver its connection drains.
	pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ChangeEvent>) {
		let (sender, receiver) = mpsc::channel(capacity);
		(Self::new(sender), receiver)
	}

	pub fn id(&self) -> SubscriberId {
		self.id
	}

	/// Hand `event` to the connection without waiting.
	pub fn deliver(&self, event: ChangeEvent) -> Result<(), DeliveryError> {
		self.sender.try_send(event).map_err(|e| match e {
			TrySendError::Full(_) => DeliveryError::BackPressure,
			TrySendError::Closed(_) => DeliveryError::Disconnected,
		})
	}
}

#[cfg(test)]
mod tests {
	use watchkv_core::{ChangeKind, Path};

	use super::*;

	#[test]
	fn test_ids_are_unique() {
		let (a, _ra) = Subscriber::channel(1);
		let (b, _rb) = Subscriber::channel(1);
		assert_ne!(a.id(), b.id());
		assert_eq!(a.clone().id(), a.id());
	}

	#[test]
	fn test_deliver_errors() {
		let event = ChangeEvent::new(ChangeKind::Set, Path::from("/x"));

		let (subscriber, mut rx) = Subscriber::channel(1);
		assert_eq!(subscriber.deliver(event.clone()), Ok(()));
		assert_eq!(subscriber.deliver(event.clone()), Err(DeliveryError::BackPressure));
		assert_eq!(rx.try_recv().unwrap(), event);

		drop(rx);
		assert_eq!(subscriber.deliver(event), Err(DeliveryError::Disconnected));
	}
}
