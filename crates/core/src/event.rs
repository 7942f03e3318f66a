// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use crate::Path;

/// Kind of change pushed to watchers of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
	Set,
	Delete,
}

impl ChangeKind {
	/// Wire token sent to subscribers.
	pub fn as_str(&self) -> &'static str {
		match self {
			ChangeKind::Set => "SET",
			ChangeKind::Delete => "DELETE",
		}
	}
}

impl Display for ChangeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A change on a single path. Lives only for the duration of a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
	pub kind: ChangeKind,
	pub path: Path,
}

impl ChangeEvent {
	pub fn new(kind: ChangeKind, path: Path) -> Self {
		Self {
			kind,
			path,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tokens() {
		assert_eq!(ChangeKind::Set.as_str(), "SET");
		assert_eq!(ChangeKind::Delete.to_string(), "DELETE");
	}
}
