//! Progress observers.
//!
//! Long-running operations report each completed step through a
//! `ProgressCallback<T>`. Any `Fn(&T) + Send + Sync` closure is an observer,
//! so callers rarely need their own type.

/// Observer of progress updates of type `T`.
///
/// Observers are notified only; they cannot stop the operation that reports
/// to them. Updates may arrive from several workers, hence `Send + Sync`.
pub trait ProgressCallback<T>: Send + Sync {
    /// Called once per completed step.
    ///
    /// # Arguments
    /// * `progress` - Progress data for the step that just finished
    fn on_progress(&self, progress: &T);
}

impl<T, F> ProgressCallback<T> for F
where
    F: Fn(&T) + Send + Sync,
{
    fn on_progress(&self, progress: &T) {
        self(progress)
    }
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl<T> ProgressCallback<T> for NoOpProgress {
    fn on_progress(&self, _progress: &T) {}
}
