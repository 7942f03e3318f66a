// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builder for the global tracing subscriber

use std::error::Error;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};
use watchkv_core::LogFormat;

/// Builder for the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub struct TracingBuilder {
	level: LevelFilter,
	format: LogFormat,
	ansi: bool,
	with_target: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: LevelFilter::INFO,
			format: LogFormat::Compact,
			ansi: true,
			with_target: true,
		}
	}

	pub fn level(mut self, level: LevelFilter) -> Self {
		self.level = level;
		self
	}

	pub fn format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	fn filter(&self) -> EnvFilter {
		EnvFilter::builder().with_default_directive(self.level.into()).from_env_lossy()
	}

	/// Install as the global default subscriber.
	///
	/// Fails if a global subscriber is already installed.
	pub fn try_init(self) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
		let filter = self.filter();
		let builder = fmt().with_env_filter(filter).with_target(self.with_target).with_ansi(self.ansi);

		match self.format {
			LogFormat::Compact => builder.compact().try_init(),
			LogFormat::Pretty => builder.pretty().try_init(),
			LogFormat::Json => builder.json().with_ansi(false).try_init(),
		}
	}

	/// Install as the global default subscriber, ignoring a subscriber that
	/// is already installed.
	pub fn init(self) {
		let _ = self.try_init();
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_second_init_is_harmless() {
		TracingBuilder::new().level(LevelFilter::DEBUG).ansi(false).init();
		TracingBuilder::new().format(LogFormat::Json).init();
		tracing::info!("still logging");
	}
}
