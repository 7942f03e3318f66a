// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared types for watchkv.
//!
//! A watchkv server stores opaque payloads under request paths and pushes a
//! short text token to every streaming connection watching a path whenever
//! that path is written.

pub mod config;
pub mod event;
pub mod path;

pub use config::{Config, ConfigError, LogFormat, StorageKind, WriteNotify};
pub use event::{ChangeEvent, ChangeKind};
pub use path::Path;
