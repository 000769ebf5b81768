//! Results adapter binding an observable result set to a grid view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use fetched_grid_core::batch::BatchTranslator;
use fetched_grid_core::change::ChangeEvent;
use fetched_grid_core::config::AdapterConfig;
use fetched_grid_core::error::{AdapterError, FetchError, Result};
use fetched_grid_core::results::{ChangeObserver, ResultSet, ResultSource};
use fetched_grid_core::view::{Provider, ViewSink};
use fetched_grid_core::{ChangeKind, Position};
use parking_lot::{Mutex, RwLock};

use crate::cycle::{CyclePhase, CycleState, FinishedCycle};
use crate::ui_queue::UiQueue;

/// State shared between the producer context and committed UI tasks.
struct Shared<T, P: ?Sized> {
    config: AdapterConfig,
    /// Snapshot served by the read API
    results: ArcSwap<ResultSet<T>>,
    view: RwLock<Option<Weak<dyn ViewSink>>>,
    provider: RwLock<Option<Weak<P>>>,
    cycle: Mutex<CycleState>,
    cycles_committed: AtomicU64,
}

impl<T, P> Shared<T, P>
where
    T: Send + Sync + 'static,
    P: Provider + ?Sized + 'static,
{
    /// Applies a finished cycle. Runs on the UI context.
    fn commit(&self, cycle: FinishedCycle, results: ResultSet<T>) {
        let FinishedCycle {
            generation,
            sections,
            rows,
        } = cycle;

        // The view reads counts while it processes the batch.
        self.results.store(Arc::new(results));

        let view = self.view.read().as_ref().and_then(Weak::upgrade);
        match view {
            Some(view) => {
                let provider = self.provider.read().clone();
                BatchTranslator::commit(
                    &sections,
                    &rows,
                    view.as_ref(),
                    Box::new(move || {
                        if let Some(provider) = provider.as_ref().and_then(Weak::upgrade) {
                            provider.on_reload_finished();
                        }
                    }),
                );
                tracing::debug!(
                    "[{}] Committed cycle {} ({} section, {} row changes)",
                    self.config.name,
                    generation,
                    sections.len(),
                    rows.len()
                );
            }
            None => {
                tracing::debug!(
                    "[{}] No view bound, skipping batch for cycle {}",
                    self.config.name,
                    generation
                );
            }
        }

        self.cycles_committed.fetch_add(1, Ordering::Relaxed);
        self.cycle.lock().settle(generation);
    }
}

/// Feeds the change cycles of a [`ResultSource`] into a grid view.
///
/// Change notifications may arrive on any context. Each finished cycle is
/// enqueued on the [`UiQueue`] as a single task that swaps in the new read
/// snapshot, applies the batch to the bound view, and notifies the bound
/// provider once the view has settled. The view and provider are held
/// weakly; their owners control their lifetime.
pub struct ResultsAdapter<T, P: ?Sized> {
    source: Arc<dyn ResultSource<T>>,
    ui: UiQueue,
    shared: Arc<Shared<T, P>>,
}

impl<T, P> ResultsAdapter<T, P>
where
    T: Send + Sync + 'static,
    P: Provider + ?Sized + 'static,
{
    /// Creates an adapter and subscribes it to `source`.
    ///
    /// # Arguments
    /// * `source` - Observable result set; owned by the adapter from now on
    /// * `ui` - Queue onto the context that owns the view
    /// * `config` - Adapter configuration
    pub fn new(source: Arc<dyn ResultSource<T>>, ui: UiQueue, config: AdapterConfig) -> Arc<Self> {
        let shared = Arc::new(Shared {
            config,
            results: ArcSwap::from_pointee(ResultSet::empty()),
            view: RwLock::new(None),
            provider: RwLock::new(None),
            cycle: Mutex::new(CycleState::default()),
            cycles_committed: AtomicU64::new(0),
        });
        let adapter = Arc::new(Self { source, ui, shared });

        let observer = Arc::downgrade(&adapter);
        let observer: Weak<dyn ChangeObserver> = observer;
        adapter.source.subscribe(observer);
        adapter
    }

    /// Loads the result set from the source.
    ///
    /// On failure the previously loaded result set stays in place.
    pub fn perform_fetch(&self) -> std::result::Result<(), FetchError> {
        match self.source.perform_fetch() {
            Ok(results) => {
                tracing::debug!(
                    "[{}] Fetched {} groups, {} items",
                    self.shared.config.name,
                    results.group_count(),
                    results.total_items()
                );
                self.shared.results.store(Arc::new(results));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[{}] Fetch failed: {}", self.shared.config.name, e);
                Err(e)
            }
        }
    }

    /// Returns the current read snapshot.
    pub fn results(&self) -> Arc<ResultSet<T>> {
        self.shared.results.load_full()
    }

    /// Number of groups to present.
    ///
    /// An empty result set is presented as one empty group unless
    /// `placeholder_group_when_empty` is disabled.
    pub fn group_count(&self) -> usize {
        let count = self.shared.results.load().group_count();
        if count == 0 && self.shared.config.placeholder_group_when_empty {
            1
        } else {
            count
        }
    }

    /// Number of items in `group`; 0 for a group that does not exist.
    pub fn item_count(&self, group: usize) -> usize {
        self.shared.results.load().item_count(group).unwrap_or(0)
    }

    /// Grouping key of `group`, if the group exists and has one.
    pub fn group_name(&self, group: usize) -> Option<String> {
        self.shared
            .results
            .load()
            .group(group)
            .and_then(|g| g.name.clone())
    }

    /// Returns the current phase of the notification cycle.
    pub fn phase(&self) -> CyclePhase {
        self.shared.cycle.lock().phase()
    }

    /// Number of cycles applied on the UI context so far.
    pub fn cycles_committed(&self) -> u64 {
        self.shared.cycles_committed.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.shared.config
    }

    /// Binds the view that committed batches are applied to.
    pub fn bind_view<V: ViewSink + 'static>(&self, view: &Arc<V>) {
        let weak = Arc::downgrade(view);
        let weak: Weak<dyn ViewSink> = weak;
        *self.shared.view.write() = Some(weak);
    }

    /// Binds a view already held behind `Arc<dyn ViewSink>`.
    pub fn bind_dyn_view(&self, view: &Arc<dyn ViewSink>) {
        *self.shared.view.write() = Some(Arc::downgrade(view));
    }

    pub fn unbind_view(&self) {
        *self.shared.view.write() = None;
    }

    /// Binds the provider that renders cells and is told about reloads.
    pub fn bind_provider(&self, provider: &Arc<P>) {
        *self.shared.provider.write() = Some(Arc::downgrade(provider));
    }

    pub fn unbind_provider(&self) {
        *self.shared.provider.write() = None;
    }

    fn provider(&self) -> Option<Arc<P>> {
        self.shared.provider.read().as_ref().and_then(Weak::upgrade)
    }

    /// Renders the cell at `position`, or the empty cell if no provider is bound.
    pub fn render_cell(&self, position: Position) -> P::Cell {
        match self.provider() {
            Some(provider) => provider.render_cell(position),
            None => Default::default(),
        }
    }

    /// Renders a supplementary view of `kind` at `position`, or the empty
    /// view if no provider is bound.
    pub fn render_supplementary(&self, kind: &str, position: Position) -> P::Supplementary {
        match self.provider() {
            Some(provider) => provider.render_supplementary(kind, position),
            None => Default::default(),
        }
    }

    fn record_event(&self, event: ChangeEvent) {
        let recorded = self.shared.cycle.lock().record(event);
        if !recorded && self.shared.config.log_dropped_events {
            tracing::debug!(
                "[{}] Dropping {:?} received outside a cycle",
                self.shared.config.name,
                event
            );
        }
    }
}

impl<T, P> ResultsAdapter<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: Provider + ?Sized + 'static,
{
    /// Returns the item at `position`.
    pub fn object_at(&self, position: Position) -> Result<T> {
        let results = self.shared.results.load();
        results
            .get(position)
            .cloned()
            .ok_or(AdapterError::PositionOutOfBounds {
                position,
                group_count: results.group_count(),
            })
    }

    /// Returns the items of `group`, empty if the group does not exist.
    pub fn items_in_group(&self, group: usize) -> Vec<T> {
        self.shared
            .results
            .load()
            .group(group)
            .map(|g| g.items.clone())
            .unwrap_or_default()
    }
}

impl<T, P> ChangeObserver for ResultsAdapter<T, P>
where
    T: Send + Sync + 'static,
    P: Provider + ?Sized + 'static,
{
    fn begin_cycle(&self) {
        let mut cycle = self.shared.cycle.lock();
        if cycle.begin() == CyclePhase::Buffering {
            tracing::warn!(
                "[{}] Cycle began before the previous one ended, discarding its changes",
                self.shared.config.name
            );
        }
        tracing::debug!(
            "[{}] Cycle {} began",
            self.shared.config.name,
            cycle.generation()
        );
    }

    fn section_changed(&self, kind: ChangeKind, index: usize) {
        self.record_event(ChangeEvent::section(kind, index));
    }

    fn row_changed(&self, kind: ChangeKind, at: Option<Position>, new_position: Option<Position>) {
        match ChangeEvent::row(kind, at, new_position) {
            Some(event) => self.record_event(event),
            None => {
                if self.shared.config.log_dropped_events {
                    tracing::debug!(
                        "[{}] Dropping malformed {:?} row change (at: {:?}, new: {:?})",
                        self.shared.config.name,
                        kind,
                        at,
                        new_position
                    );
                }
            }
        }
    }

    fn end_cycle(&self) {
        let Some(finished) = self.shared.cycle.lock().finish() else {
            tracing::debug!(
                "[{}] Cycle ended without beginning, ignoring",
                self.shared.config.name
            );
            return;
        };

        let generation = finished.generation;
        if self.ui.is_closed() {
            tracing::warn!(
                "[{}] UI queue closed, dropping commit of cycle {}",
                self.shared.config.name,
                generation
            );
            self.shared.cycle.lock().settle(generation);
            return;
        }

        let results = self.source.current();
        let shared = self.shared.clone();
        let queued = self
            .ui
            .enqueue(Box::new(move || shared.commit(finished, results)));

        if !queued {
            tracing::warn!(
                "[{}] UI queue closed, dropping commit of cycle {}",
                self.shared.config.name,
                generation
            );
            self.shared.cycle.lock().settle(generation);
        }
    }
}
