// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Path subscriptions and change fan-out.
//!
//! The [`SubscriptionRegistry`] maps each watched [`Path`](watchkv_core::Path)
//! to the set of streaming connections attached to it. Writers call
//! [`SubscriptionRegistry::broadcast`], which snapshots the set under the
//! path's shard lock and then delivers outside of it, so a slow subscriber
//! never stalls registration on other paths.
//!
//! Delivery is best-effort: each subscriber owns a bounded channel drained by
//! its connection task. A full or closed channel drops the notification, gets
//! logged, and never affects other subscribers or the caller.

pub mod delivery;
pub mod fanout;
pub mod registry;
pub mod subscriber;

pub use delivery::{BroadcastReport, DeliveryError};
pub use registry::{Subscription, SubscriptionRegistry};
pub use subscriber::{Subscriber, SubscriberId};
