use std::collections::BTreeSet;

use crate::change::{RowUpdates, SectionUpdates};
use crate::view::{BatchMutations, ViewSink};

use super::mutation::Mutation;

/// Replays the updates of one cycle as ordered view mutations.
///
/// Groups are finalized before any row mutation references them. Within
/// each level the order is insert, delete, reload, then moves; the view
/// resolves index shifts across the whole batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchTranslator;

impl BatchTranslator {
    /// Issues the mutations for `sections` and `rows` against `view`.
    ///
    /// Section indices are passed as ascending, de-duplicated index sets;
    /// row positions are passed in arrival order. Steps with nothing to do
    /// issue no call. Each move becomes a delete at its source followed by
    /// an insert at its destination, one move at a time.
    ///
    /// # Arguments
    /// * `sections` - Group-level changes of the cycle
    /// * `rows` - Item-level changes of the cycle
    /// * `view` - Mutation target, normally inside a batch-apply transaction
    pub fn apply(sections: &SectionUpdates, rows: &RowUpdates, view: &mut dyn BatchMutations) {
        let inserted = index_set(&sections.inserted);
        if !inserted.is_empty() {
            view.insert_sections(&inserted);
        }
        let deleted = index_set(&sections.deleted);
        if !deleted.is_empty() {
            view.delete_sections(&deleted);
        }
        let updated = index_set(&sections.updated);
        if !updated.is_empty() {
            view.reload_sections(&updated);
        }
        for &(from, to) in &sections.moved {
            view.delete_sections(&[from]);
            view.insert_sections(&[to]);
        }

        if !rows.inserted.is_empty() {
            view.insert_rows(&rows.inserted);
        }
        if !rows.deleted.is_empty() {
            view.delete_rows(&rows.deleted);
        }
        if !rows.updated.is_empty() {
            view.reload_rows(&rows.updated);
        }
        for &(from, to) in &rows.moved {
            view.delete_rows(&[from]);
            view.insert_rows(&[to]);
        }
    }

    /// Applies the updates as a single batch on `sink`.
    ///
    /// `on_finished` runs once the sink reports the batch as settled.
    pub fn commit(
        sections: &SectionUpdates,
        rows: &RowUpdates,
        sink: &dyn ViewSink,
        on_finished: Box<dyn FnOnce() + Send>,
    ) {
        let mut work = |view: &mut dyn BatchMutations| Self::apply(sections, rows, view);
        sink.apply_batch(&mut work, on_finished);
    }

    /// Returns the mutation calls `apply` would issue, in order.
    pub fn plan(sections: &SectionUpdates, rows: &RowUpdates) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        Self::apply(sections, rows, &mut mutations);
        mutations
    }
}

fn index_set(indices: &[usize]) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
