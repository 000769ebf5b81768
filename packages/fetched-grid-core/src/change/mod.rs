//! Per-cycle change events and the buffer that accumulates them.

mod change_buffer;
mod event;
mod updates;

pub use change_buffer::ChangeBuffer;
pub use event::ChangeEvent;
pub use updates::{RowUpdates, SectionUpdates, UpdateKind, Updates};
