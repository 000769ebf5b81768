//! Drives a grid view from the change cycles of an observable result set.
//!
//! The [`ResultsAdapter`] subscribes to a [`ResultSource`], buffers each
//! notification cycle, and hands the finished cycle to the UI-owning context
//! through a [`UiQueue`], where it is applied to the bound view as one batch.

mod adapter;
mod cycle;
pub mod ui_queue;

pub use adapter::ResultsAdapter;
pub use cycle::CyclePhase;
pub use ui_queue::{ui_queue, UiExecutor, UiQueue, UiTask};

pub use fetched_grid_core::config::AdapterConfig;
pub use fetched_grid_core::error::{AdapterError, FetchError, Result};
pub use fetched_grid_core::results::{ChangeObserver, Group, ResultSet, ResultSource};
pub use fetched_grid_core::view::{BatchMutations, Provider, ViewSink};
pub use fetched_grid_core::{ChangeKind, Position};
