//! Translation of buffered cycle changes into view mutation batches.

mod mutation;
mod translator;

pub use mutation::Mutation;
pub use translator::BatchTranslator;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::change::{ChangeBuffer, ChangeEvent, RowUpdates, SectionUpdates};
    use crate::position::Position;
    use crate::view::{BatchMutations, ViewSink};
    use ntest::timeout;

    fn pos(group: usize, item: usize) -> Position {
        Position::new(group, item)
    }

    /// Records every batch it receives and completes immediately.
    #[derive(Default)]
    struct RecordingSink {
        batches: Mutex<Vec<Vec<Mutation>>>,
    }

    impl ViewSink for RecordingSink {
        fn apply_batch(
            &self,
            work: &mut dyn FnMut(&mut dyn BatchMutations),
            completion: Box<dyn FnOnce() + Send>,
        ) {
            let mut batch = Vec::new();
            work(&mut batch);
            self.batches.lock().unwrap().push(batch);
            completion();
        }
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_row_scenario() {
        let mut buffer = ChangeBuffer::new();
        buffer.record(ChangeEvent::RowInserted { position: pos(0, 0) });
        buffer.record(ChangeEvent::RowInserted { position: pos(0, 1) });
        buffer.record(ChangeEvent::RowDeleted { position: pos(1, 2) });

        let (sections, rows) = buffer.snapshot();
        assert_eq!(
            BatchTranslator::plan(&sections, &rows),
            vec![
                Mutation::InsertRows(vec![pos(0, 0), pos(0, 1)]),
                Mutation::DeleteRows(vec![pos(1, 2)]),
            ]
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_fixed_order_ignores_arrival_order() {
        let mut buffer = ChangeBuffer::new();
        buffer.record(ChangeEvent::RowMoved {
            from: pos(0, 0),
            to: pos(2, 1),
        });
        buffer.record(ChangeEvent::RowUpdated { position: pos(1, 0) });
        buffer.record(ChangeEvent::RowDeleted { position: pos(0, 3) });
        buffer.record(ChangeEvent::RowInserted { position: pos(2, 0) });
        buffer.record(ChangeEvent::SectionUpdated { index: 1 });
        buffer.record(ChangeEvent::SectionDeleted { index: 3 });
        buffer.record(ChangeEvent::SectionInserted { index: 2 });

        let (sections, rows) = buffer.snapshot();
        assert_eq!(
            BatchTranslator::plan(&sections, &rows),
            vec![
                Mutation::InsertSections(vec![2]),
                Mutation::DeleteSections(vec![3]),
                Mutation::ReloadSections(vec![1]),
                Mutation::InsertRows(vec![pos(2, 0)]),
                Mutation::DeleteRows(vec![pos(0, 3)]),
                Mutation::ReloadRows(vec![pos(1, 0)]),
                Mutation::DeleteRows(vec![pos(0, 0)]),
                Mutation::InsertRows(vec![pos(2, 1)]),
            ]
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_row_moves_are_delete_then_insert_per_move() {
        let mut rows = RowUpdates::default();
        rows.push_move(pos(0, 0), pos(0, 1));
        rows.push_move(pos(0, 1), pos(0, 0));

        assert_eq!(
            BatchTranslator::plan(&SectionUpdates::default(), &rows),
            vec![
                Mutation::DeleteRows(vec![pos(0, 0)]),
                Mutation::InsertRows(vec![pos(0, 1)]),
                Mutation::DeleteRows(vec![pos(0, 1)]),
                Mutation::InsertRows(vec![pos(0, 0)]),
            ]
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_section_moves_are_two_phase() {
        let mut sections = SectionUpdates::default();
        sections.inserted.push(0);
        sections.push_move(4, 1);

        assert_eq!(
            BatchTranslator::plan(&sections, &RowUpdates::default()),
            vec![
                Mutation::InsertSections(vec![0]),
                Mutation::DeleteSections(vec![4]),
                Mutation::InsertSections(vec![1]),
            ]
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_section_indices_are_index_sets() {
        let mut sections = SectionUpdates::default();
        sections.inserted.extend([5, 1, 3, 1]);
        sections.deleted.extend([2, 0]);

        assert_eq!(
            BatchTranslator::plan(&sections, &RowUpdates::default()),
            vec![
                Mutation::InsertSections(vec![1, 3, 5]),
                Mutation::DeleteSections(vec![0, 2]),
            ]
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_empty_cycle_issues_nothing() {
        let plan = BatchTranslator::plan(&SectionUpdates::default(), &RowUpdates::default());
        assert!(plan.is_empty());
    }

    #[timeout(1000)]
    #[test]
    fn test_translator_commit_uses_one_batch_and_signals_once() {
        let sink = Arc::new(RecordingSink::default());
        let finished = Arc::new(AtomicUsize::new(0));

        let mut rows = RowUpdates::default();
        rows.inserted.push(pos(0, 0));
        rows.updated.push(pos(0, 2));
        let mut sections = SectionUpdates::default();
        sections.updated.push(1);

        let counter = finished.clone();
        BatchTranslator::commit(
            &sections,
            &rows,
            sink.as_ref(),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let batches = sink.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0],
            vec![
                Mutation::ReloadSections(vec![1]),
                Mutation::InsertRows(vec![pos(0, 0)]),
                Mutation::ReloadRows(vec![pos(0, 2)]),
            ]
        );
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[timeout(1000)]
    #[test]
    fn test_mutation_target_count() {
        assert_eq!(Mutation::InsertRows(vec![pos(0, 0), pos(0, 1)]).target_count(), 2);
        assert_eq!(Mutation::ReloadSections(Vec::new()).target_count(), 0);
    }
}
