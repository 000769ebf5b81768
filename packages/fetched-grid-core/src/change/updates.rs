use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Buffer-level classification of a non-move change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Inserted,
    Deleted,
    Updated,
}

/// Changes of one cycle for one level of the structure, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updates<E> {
    /// Entities inserted during the cycle
    pub inserted: Vec<E>,
    /// Entities deleted during the cycle
    pub deleted: Vec<E>,
    /// Entities changed in place during the cycle
    pub updated: Vec<E>,
    /// (from, to) pairs of entities moved during the cycle
    pub moved: Vec<(E, E)>,
}

/// Group-level changes, addressed by group index.
pub type SectionUpdates = Updates<usize>;

/// Item-level changes, addressed by position.
pub type RowUpdates = Updates<Position>;

impl<E> Updates<E> {
    /// Creates an empty update set.
    pub fn new() -> Self {
        Self {
            inserted: Vec::new(),
            deleted: Vec::new(),
            updated: Vec::new(),
            moved: Vec::new(),
        }
    }

    /// Appends `entity` to the list matching `kind`.
    pub fn push(&mut self, kind: UpdateKind, entity: E) {
        self.list_mut(kind).push(entity);
    }

    /// Appends a move pair.
    pub fn push_move(&mut self, from: E, to: E) {
        self.moved.push((from, to));
    }

    fn list_mut(&mut self, kind: UpdateKind) -> &mut Vec<E> {
        match kind {
            UpdateKind::Inserted => &mut self.inserted,
            UpdateKind::Deleted => &mut self.deleted,
            UpdateKind::Updated => &mut self.updated,
        }
    }

    /// Number of recorded changes; a move counts once.
    pub fn len(&self) -> usize {
        self.inserted.len() + self.deleted.len() + self.updated.len() + self.moved.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for Updates<E> {
    fn default() -> Self {
        Self::new()
    }
}
