use serde::{Deserialize, Serialize};

use crate::position::{ChangeKind, Position};

/// A single change reported against a sectioned result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A group was inserted at `index`
    SectionInserted { index: usize },
    /// The group at `index` was deleted
    SectionDeleted { index: usize },
    /// The group at `index` changed in place
    SectionUpdated { index: usize },
    /// A group was reordered (not supported by the buffer)
    SectionMoved { from: usize, to: usize },
    /// An item was inserted at `position`
    RowInserted { position: Position },
    /// The item at `position` was deleted
    RowDeleted { position: Position },
    /// The item at `position` changed in place
    RowUpdated { position: Position },
    /// An item moved from `from` to `to`
    RowMoved { from: Position, to: Position },
}

impl ChangeEvent {
    /// Builds the event for a section-level notification.
    ///
    /// Section notifications carry a single index, so a move is reported
    /// with the same index on both sides.
    pub fn section(kind: ChangeKind, index: usize) -> Self {
        match kind {
            ChangeKind::Insert => ChangeEvent::SectionInserted { index },
            ChangeKind::Delete => ChangeEvent::SectionDeleted { index },
            ChangeKind::Update => ChangeEvent::SectionUpdated { index },
            ChangeKind::Move => ChangeEvent::SectionMoved {
                from: index,
                to: index,
            },
        }
    }

    /// Builds the event for an item-level notification.
    ///
    /// Inserts are addressed by `new_position`, deletes and updates by `at`,
    /// moves need both. Returns `None` when the required position is missing.
    ///
    /// # Arguments
    /// * `kind` - Reported change kind
    /// * `at` - Position of the item before the change
    /// * `new_position` - Position of the item after the change
    pub fn row(kind: ChangeKind, at: Option<Position>, new_position: Option<Position>) -> Option<Self> {
        match kind {
            ChangeKind::Insert => new_position.map(|position| ChangeEvent::RowInserted { position }),
            ChangeKind::Delete => at.map(|position| ChangeEvent::RowDeleted { position }),
            ChangeKind::Update => at.map(|position| ChangeEvent::RowUpdated { position }),
            ChangeKind::Move => match (at, new_position) {
                (Some(from), Some(to)) => Some(ChangeEvent::RowMoved { from, to }),
                _ => None,
            },
        }
    }
}
