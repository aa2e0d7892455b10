// src/progress.rs
/// Progress reporting for multi-page runs.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of pages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page read and processed.
    fn item_done(&mut self, _index: usize, _label: &str) {}

    /// One page could not be read; the run goes on without it.
    fn item_failed(&mut self, _index: usize, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
