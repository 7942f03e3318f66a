// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process configuration, read once from the environment at startup.

use std::{
	env,
	net::{IpAddr, Ipv4Addr, SocketAddr},
	path::PathBuf,
	str::FromStr,
	time::Duration,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
	#[error("invalid value {value:?} for {key}: {reason}")]
	Invalid {
		key: &'static str,
		value: String,
		reason: String,
	},
}

impl ConfigError {
	fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
		ConfigError::Invalid {
			key,
			value: value.to_string(),
			reason: reason.to_string(),
		}
	}
}

/// Storage engine backing the key-value namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
	#[default]
	Sqlite,
	Memory,
}

impl FromStr for StorageKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"sqlite" => Ok(StorageKind::Sqlite),
			"memory" => Ok(StorageKind::Memory),
			other => Err(format!("unknown storage {other}, expected sqlite or memory")),
		}
	}
}

/// Notification contract applied to PUT and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteNotify {
	/// SET, read body, DELETE, then store. Both tokens fire before the write
	/// commits, whether or not it succeeds.
	#[default]
	Compat,
	/// Read body, store, then a single SET if the store succeeded.
	Commit,
}

impl FromStr for WriteNotify {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"compat" => Ok(WriteNotify::Compat),
			"commit" => Ok(WriteNotify::Commit),
			other => Err(format!("unknown mode {other}, expected compat or commit")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Compact,
	Pretty,
	Json,
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"compact" => Ok(LogFormat::Compact),
			"pretty" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("unknown format {other}, expected compact, pretty or json")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Directory holding the storage file.
	pub data_dir: PathBuf,
	/// Storage file name inside `data_dir`.
	pub db_file: String,
	pub storage: StorageKind,
	pub bind_host: IpAddr,
	pub port: u16,
	/// Capacity of each subscriber's notification channel. A full channel
	/// drops the notification.
	pub watch_buffer: usize,
	/// Close streaming connections silent for this long. Disabled when `None`.
	pub watch_idle_timeout: Option<Duration>,
	pub max_body_size: usize,
	pub write_notify: WriteNotify,
	pub log_format: LogFormat,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("."),
			db_file: "store.db".to_string(),
			storage: StorageKind::default(),
			bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
			port: 3000,
			watch_buffer: 16,
			watch_idle_timeout: None,
			max_body_size: 64 * 1024 * 1024,
			write_notify: WriteNotify::default(),
			log_format: LogFormat::default(),
		}
	}
}

impl Config {
	/// Load configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Load configuration through `lookup`. Unset and empty variables keep
	/// their defaults.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
		let mut config = Self::default();

		if let Some(dir) = get("DB_ROOT") {
			config.data_dir = PathBuf::from(dir);
		}
		if let Some(file) = get("DB_FILE") {
			config.db_file = file;
		}
		if let Some(v) = get("DB_STORAGE") {
			config.storage = v.parse().map_err(|e| ConfigError::invalid("DB_STORAGE", &v, e))?;
		}
		if let Some(v) = get("BIND_HOST") {
			config.bind_host = v.parse().map_err(|e| ConfigError::invalid("BIND_HOST", &v, e))?;
		}
		if let Some(v) = get("PORT") {
			config.port = v.parse().map_err(|e| ConfigError::invalid("PORT", &v, e))?;
		}
		if let Some(v) = get("WATCH_BUFFER") {
			let buffer: usize = v.parse().map_err(|e| ConfigError::invalid("WATCH_BUFFER", &v, e))?;
			if buffer == 0 {
				return Err(ConfigError::invalid("WATCH_BUFFER", &v, "must be at least 1"));
			}
			config.watch_buffer = buffer;
		}
		if let Some(v) = get("WATCH_IDLE_TIMEOUT") {
			let secs: u64 = v.parse().map_err(|e| ConfigError::invalid("WATCH_IDLE_TIMEOUT", &v, e))?;
			config.watch_idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
		}
		if let Some(v) = get("MAX_BODY_SIZE") {
			config.max_body_size = v.parse().map_err(|e| ConfigError::invalid("MAX_BODY_SIZE", &v, e))?;
		}
		if let Some(v) = get("WRITE_NOTIFY") {
			config.write_notify = v.parse().map_err(|e| ConfigError::invalid("WRITE_NOTIFY", &v, e))?;
		}
		if let Some(v) = get("LOG_FORMAT") {
			config.log_format = v.parse().map_err(|e| ConfigError::invalid("LOG_FORMAT", &v, e))?;
		}

		Ok(config)
	}

	/// Full path of the storage file.
	pub fn db_path(&self) -> PathBuf {
		self.data_dir.join(&self.db_file)
	}

	pub fn bind_addr(&self) -> SocketAddr {
		SocketAddr::new(self.bind_host, self.port)
	}
}
