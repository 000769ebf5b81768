//! Item positions and inbound change kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of one item in a two-level ordered structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Group (section) index
    pub group: usize,
    /// Offset of the item within its group
    pub item: usize,
}

impl Position {
    /// Creates a position from a group index and an offset within that group.
    pub const fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }
}

impl From<(usize, usize)> for Position {
    fn from((group, item): (usize, usize)) -> Self {
        Self { group, item }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.group, self.item)
    }
}

/// Kind of change reported by a result source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Delete,
    Update,
    Move,
}
