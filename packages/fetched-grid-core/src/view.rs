//! Contracts for the view being driven and the provider rendering into it.

use crate::position::Position;

/// Structural mutations available inside a batch-apply transaction.
///
/// Indices refer to the state before the batch for deletes and reloads, and
/// to the state after the batch for inserts; the implementor resolves the
/// shifts once the whole batch has been issued.
pub trait BatchMutations {
    fn insert_sections(&mut self, indices: &[usize]);
    fn delete_sections(&mut self, indices: &[usize]);
    fn reload_sections(&mut self, indices: &[usize]);
    fn insert_rows(&mut self, positions: &[Position]);
    fn delete_rows(&mut self, positions: &[Position]);
    fn reload_rows(&mut self, positions: &[Position]);
}

/// A grid view that accepts structural mutations in atomic batches.
///
/// Only called from the UI-owning execution context.
pub trait ViewSink: Send + Sync {
    /// Runs `work` exactly once as a single transaction, then invokes
    /// `completion` once the view's layout has settled.
    ///
    /// # Arguments
    /// * `work` - Issues the mutations of the batch
    /// * `completion` - Called after the batch has been applied
    fn apply_batch(
        &self,
        work: &mut dyn FnMut(&mut dyn BatchMutations),
        completion: Box<dyn FnOnce() + Send>,
    );
}

/// Supplies rendered content for the view on demand.
pub trait Provider: Send + Sync {
    /// Rendered item cell; the default value is the empty rendering
    type Cell: Default;
    /// Rendered supplementary view (header, footer, ...)
    type Supplementary: Default;

    fn render_cell(&self, position: Position) -> Self::Cell;

    fn render_supplementary(&self, kind: &str, position: Position) -> Self::Supplementary;

    /// Called once per committed cycle, after the view settled.
    fn on_reload_finished(&self);
}
