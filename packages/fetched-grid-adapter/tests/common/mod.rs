//! Shared fixtures: a scripted result source, a recording view, and a
//! counting provider.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use fetched_grid_adapter::{
    BatchMutations, ChangeKind, ChangeObserver, FetchError, Group, Position, Provider, ResultSet,
    ResultSource, ResultsAdapter, ViewSink,
};
use fetched_grid_core::batch::Mutation;
use parking_lot::Mutex;
use serde::Deserialize;

/// One inbound notification of a scripted cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "notify", rename_all = "snake_case")]
pub enum Notification {
    Section {
        kind: ChangeKind,
        index: usize,
    },
    Row {
        kind: ChangeKind,
        at: Option<Position>,
        new_position: Option<Position>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupFixture {
    pub name: Option<String>,
    pub items: Vec<String>,
}

/// A recorded cycle: the state before and after, and the notifications in between.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedCycle {
    pub before: Vec<GroupFixture>,
    pub after: Vec<GroupFixture>,
    pub events: Vec<Notification>,
}

pub fn result_set(groups: &[GroupFixture]) -> ResultSet<String> {
    groups
        .iter()
        .map(|g| Group {
            name: g.name.clone(),
            items: g.items.clone(),
        })
        .collect()
}

pub fn groups(layout: Vec<(&str, Vec<&str>)>) -> ResultSet<String> {
    layout.into_iter()
        .map(|(name, items)| Group::named(name, items.into_iter().map(String::from).collect()))
        .collect()
}

/// Result source whose cycles are driven by the test.
#[derive(Default)]
pub struct ScriptedSource {
    state: Mutex<ResultSet<String>>,
    fetch_error: Mutex<Option<FetchError>>,
    observer: Mutex<Option<Weak<dyn ChangeObserver>>>,
}

impl ScriptedSource {
    pub fn with_state(state: ResultSet<String>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            ..Default::default()
        })
    }

    pub fn fail_fetches_with(&self, error: Option<FetchError>) {
        *self.fetch_error.lock() = error;
    }

    fn observer(&self) -> Arc<dyn ChangeObserver> {
        self.observer
            .lock()
            .as_ref()
            .and_then(Weak::upgrade)
            .expect("no observer subscribed")
    }

    /// Reports one cycle moving the source to `next`.
    pub fn emit(&self, next: ResultSet<String>, events: &[Notification]) {
        let observer = self.observer();
        observer.begin_cycle();
        *self.state.lock() = next;
        self.send(events);
        observer.end_cycle();
    }

    /// Sends notifications without cycle boundaries.
    pub fn send(&self, events: &[Notification]) {
        let observer = self.observer();
        for event in events {
            match *event {
                Notification::Section { kind, index } => observer.section_changed(kind, index),
                Notification::Row {
                    kind,
                    at,
                    new_position,
                } => observer.row_changed(kind, at, new_position),
            }
        }
    }
}

impl ResultSource<String> for ScriptedSource {
    fn perform_fetch(&self) -> Result<ResultSet<String>, FetchError> {
        if let Some(error) = self.fetch_error.lock().clone() {
            return Err(error);
        }
        Ok(self.state.lock().clone())
    }

    fn current(&self) -> ResultSet<String> {
        self.state.lock().clone()
    }

    fn subscribe(&self, observer: Weak<dyn ChangeObserver>) {
        *self.observer.lock() = Some(observer);
    }
}

pub type TestAdapter = ResultsAdapter<String, TestProvider>;

/// View recording each batch as a list of mutation calls.
#[derive(Default)]
pub struct RecordingView {
    pub batches: Mutex<Vec<Vec<Mutation>>>,
    /// Hold completions until `settle` is called
    pub defer_completion: bool,
    pending: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    /// Adapter whose group counts are read while a batch is applied
    pub observed_adapter: Mutex<Option<Weak<TestAdapter>>>,
    pub counts_during_batch: Mutex<Vec<usize>>,
}

impl RecordingView {
    pub fn deferred() -> Arc<Self> {
        Arc::new(Self {
            defer_completion: true,
            ..Default::default()
        })
    }

    pub fn batches(&self) -> Vec<Vec<Mutation>> {
        self.batches.lock().clone()
    }

    /// Runs the completions held back so far.
    pub fn settle(&self) -> usize {
        let pending: Vec<_> = self.pending.lock().drain(..).collect();
        let count = pending.len();
        for completion in pending {
            completion();
        }
        count
    }
}

impl ViewSink for RecordingView {
    fn apply_batch(
        &self,
        work: &mut dyn FnMut(&mut dyn BatchMutations),
        completion: Box<dyn FnOnce() + Send>,
    ) {
        if let Some(adapter) = self.observed_adapter.lock().as_ref().and_then(Weak::upgrade) {
            self.counts_during_batch.lock().push(adapter.group_count());
        }

        let mut batch: Vec<Mutation> = Vec::new();
        work(&mut batch);
        self.batches.lock().push(batch);

        if self.defer_completion {
            self.pending.lock().push(completion);
        } else {
            completion();
        }
    }
}

/// Provider rendering text cells and counting reload notifications.
#[derive(Default)]
pub struct TestProvider {
    pub reloads: AtomicUsize,
}

impl TestProvider {
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl Provider for TestProvider {
    type Cell = String;
    type Supplementary = String;

    fn render_cell(&self, position: Position) -> String {
        format!("cell {position}")
    }

    fn render_supplementary(&self, kind: &str, position: Position) -> String {
        format!("{kind} {}", position.group)
    }

    fn on_reload_finished(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn row(kind: ChangeKind, at: Option<(usize, usize)>, new_position: Option<(usize, usize)>) -> Notification {
    Notification::Row {
        kind,
        at: at.map(Position::from),
        new_position: new_position.map(Position::from),
    }
}

pub fn section(kind: ChangeKind, index: usize) -> Notification {
    Notification::Section { kind, index }
}
