use crate::position::Position;

use super::event::ChangeEvent;
use super::updates::{RowUpdates, SectionUpdates, UpdateKind};

/// Collects the changes of a single notification cycle.
///
/// Nothing recorded here reaches the view until the cycle ends and the
/// snapshot is handed to the batch translator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBuffer {
    /// Group-level changes of the current cycle
    sections: SectionUpdates,
    /// Item-level changes of the current cycle
    rows: RowUpdates,
}

impl ChangeBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records any change event.
    ///
    /// # Panics
    /// Panics on `ChangeEvent::SectionMoved`, see [`ChangeBuffer::record_section_move`].
    pub fn record(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::SectionInserted { index } => {
                self.record_section_change(UpdateKind::Inserted, index)
            }
            ChangeEvent::SectionDeleted { index } => {
                self.record_section_change(UpdateKind::Deleted, index)
            }
            ChangeEvent::SectionUpdated { index } => {
                self.record_section_change(UpdateKind::Updated, index)
            }
            ChangeEvent::SectionMoved { from, to } => self.record_section_move(from, to),
            ChangeEvent::RowInserted { position } => {
                self.record_row_change(UpdateKind::Inserted, position)
            }
            ChangeEvent::RowDeleted { position } => {
                self.record_row_change(UpdateKind::Deleted, position)
            }
            ChangeEvent::RowUpdated { position } => {
                self.record_row_change(UpdateKind::Updated, position)
            }
            ChangeEvent::RowMoved { from, to } => self.record_row_move(from, to),
        }
    }

    /// Records a group insert, delete or in-place update.
    pub fn record_section_change(&mut self, kind: UpdateKind, index: usize) {
        self.sections.push(kind, index);
    }

    /// Rejects a group move.
    ///
    /// Reordering groups cannot be replayed as a delete/insert pair without
    /// losing group identity, so a source that reports one has changed its
    /// semantics underneath the adapter.
    ///
    /// # Panics
    /// Always.
    pub fn record_section_move(&mut self, from: usize, to: usize) {
        tracing::error!("Unsupported section move from {} to {}", from, to);
        panic!("section move from {from} to {to} is not supported");
    }

    /// Records an item insert, delete or in-place update.
    pub fn record_row_change(&mut self, kind: UpdateKind, position: Position) {
        self.rows.push(kind, position);
    }

    /// Records an item move.
    pub fn record_row_move(&mut self, from: Position, to: Position) {
        self.rows.push_move(from, to);
    }

    /// Clears both update sets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns a copy of the recorded section and row updates.
    pub fn snapshot(&self) -> (SectionUpdates, RowUpdates) {
        (self.sections.clone(), self.rows.clone())
    }

    /// Moves the recorded updates out, leaving an empty buffer behind.
    pub fn take(&mut self) -> (SectionUpdates, RowUpdates) {
        let taken = std::mem::take(self);
        (taken.sections, taken.rows)
    }

    /// Returns the recorded group-level changes.
    pub fn sections(&self) -> &SectionUpdates {
        &self.sections
    }

    /// Returns the recorded item-level changes.
    pub fn rows(&self) -> &RowUpdates {
        &self.rows
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.sections.len() + self.rows.len()
    }

    /// Returns `true` if no event was recorded since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
