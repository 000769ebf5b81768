//! Change buffering and batch translation for sectioned grid views.
//!
//! Provides the per-cycle change buffer, the batch translator that replays a
//! cycle as ordered section and row mutations, and the contracts for the
//! result source, the view sink, and the rendering provider.

pub mod batch;
pub mod change;
pub mod config;
pub mod error;
pub mod position;
pub mod results;
pub mod view;

pub use batch::BatchTranslator;
pub use change::{ChangeBuffer, ChangeEvent, RowUpdates, SectionUpdates, UpdateKind};
pub use position::{ChangeKind, Position};
