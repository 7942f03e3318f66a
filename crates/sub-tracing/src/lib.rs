// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide `tracing` subscriber setup.

pub mod builder;

pub use builder::TracingBuilder;
