//! Notification cycle state machine.

use fetched_grid_core::change::{ChangeBuffer, ChangeEvent, RowUpdates, SectionUpdates};

/// Where the adapter is within a notification cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    /// No cycle in progress
    #[default]
    Idle,
    /// Between begin and end, recording events
    Buffering,
    /// Cycle ended, batch queued for the UI context
    Committing,
}

/// A finished cycle, ready to be committed.
#[derive(Debug)]
pub(crate) struct FinishedCycle {
    pub generation: u64,
    pub sections: SectionUpdates,
    pub rows: RowUpdates,
}

/// Buffer and phase of the cycle currently being observed.
#[derive(Debug, Default)]
pub(crate) struct CycleState {
    phase: CyclePhase,
    /// Incremented at every begin; identifies the cycle a commit belongs to
    generation: u64,
    buffer: ChangeBuffer,
}

impl CycleState {
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new cycle with an empty buffer.
    ///
    /// # Returns
    /// The phase the state was in before the call.
    pub fn begin(&mut self) -> CyclePhase {
        let previous = self.phase;
        self.generation += 1;
        self.buffer.reset();
        self.phase = CyclePhase::Buffering;
        previous
    }

    /// Records `event` if a cycle is being buffered.
    ///
    /// # Returns
    /// `false` if the event arrived outside a cycle and was not recorded.
    pub fn record(&mut self, event: ChangeEvent) -> bool {
        if self.phase != CyclePhase::Buffering {
            return false;
        }
        self.buffer.record(event);
        true
    }

    /// Ends the buffered cycle and moves its updates out.
    ///
    /// Returns `None` when no cycle was being buffered.
    pub fn finish(&mut self) -> Option<FinishedCycle> {
        if self.phase != CyclePhase::Buffering {
            return None;
        }
        self.phase = CyclePhase::Committing;
        let (sections, rows) = self.buffer.take();
        Some(FinishedCycle {
            generation: self.generation,
            sections,
            rows,
        })
    }

    /// Returns to idle once the commit of `generation` has run, unless a
    /// newer cycle has started meanwhile.
    pub fn settle(&mut self, generation: u64) {
        if self.generation == generation && self.phase == CyclePhase::Committing {
            self.phase = CyclePhase::Idle;
        }
    }
}
