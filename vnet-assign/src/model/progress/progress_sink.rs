/// receives the progress of the worker batches and may request an abort.
pub trait ProgressSink: Send + Sync {
    /// a batch of `total` tasks starts.
    fn start_progress(&self, total: usize);

    /// one task of the batch is done. returning false asks the run to stop.
    fn update_progress(&self, message: &str) -> bool;

    fn stop_progress(&self);
}

/// ignores progress and never aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn start_progress(&self, _total: usize) {}

    fn update_progress(&self, _message: &str) -> bool {
        true
    }

    fn stop_progress(&self) {}
}
