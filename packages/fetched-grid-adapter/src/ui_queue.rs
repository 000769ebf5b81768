//! Task handoff onto the UI-owning execution context.

use tokio::sync::mpsc;

/// Unit of work executed on the UI-owning context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected queue/executor pair.
///
/// The queue is handed to producers; the executor stays on the context that
/// owns the view.
pub fn ui_queue() -> (UiQueue, UiExecutor) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiQueue { tx }, UiExecutor { rx, executed: 0 })
}

/// Sending half of the UI task queue. Enqueueing never blocks.
#[derive(Clone)]
pub struct UiQueue {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl UiQueue {
    /// Schedules `task` on the UI context.
    ///
    /// # Returns
    /// `false` if the executor is gone and the task was dropped.
    pub fn enqueue(&self, task: UiTask) -> bool {
        self.tx.send(task).is_ok()
    }

    /// Returns `true` once the executor has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of the UI task queue, owned by the UI context.
pub struct UiExecutor {
    rx: mpsc::UnboundedReceiver<UiTask>,
    executed: u64,
}

impl UiExecutor {
    /// Runs every task queued so far without waiting for more.
    ///
    /// Suited to hosts that drain the queue once per frame.
    ///
    /// # Returns
    /// Number of tasks executed.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            count += 1;
        }
        self.executed += count as u64;
        count
    }

    /// Waits for the next task and runs it.
    ///
    /// # Returns
    /// `false` once every queue handle has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                self.executed += 1;
                true
            }
            None => false,
        }
    }

    /// Runs tasks until every queue handle has been dropped.
    pub async fn run(mut self) {
        while self.run_next().await {}
        tracing::debug!("UI executor stopped after {} tasks", self.executed);
    }

    /// Total number of tasks executed by this executor.
    pub fn executed(&self) -> u64 {
        self.executed
    }
}
