// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::Deref,
	sync::Arc,
};

/// Resource path of a request.
///
/// Used verbatim as the storage key and as the subscription topic. Two paths
/// are equal iff their bytes are equal; no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Arc<[u8]>);

impl Path {
	pub fn new(bytes: impl AsRef<[u8]>) -> Self {
		Self(Arc::from(bytes.as_ref()))
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl Deref for Path {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl AsRef<[u8]> for Path {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl From<&str> for Path {
	fn from(value: &str) -> Self {
		Self::new(value.as_bytes())
	}
}

impl From<String> for Path {
	fn from(value: String) -> Self {
		Self::new(value.into_bytes())
	}
}

impl From<&[u8]> for Path {
	fn from(value: &[u8]) -> Self {
		Self::new(value)
	}
}

impl From<Vec<u8>> for Path {
	fn from(value: Vec<u8>) -> Self {
		Self(Arc::from(value))
	}
}

impl Display for Path {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&String::from_utf8_lossy(&self.0))
	}
}
