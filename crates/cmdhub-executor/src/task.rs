//! Handles to submitted tasks.

use tokio::sync::oneshot;

use crate::executor::ExecutorError;

/// A handle to the result of a submitted task.
///
/// Produced by [`TaskExecutorExt::submit`](crate::TaskExecutorExt::submit).
/// Dropping the handle discards the result without affecting the task.
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Waits for the task's result.
    ///
    /// Fails with [`ExecutorError::Abandoned`] if the execution strategy
    /// dropped the task before it produced a result.
    pub async fn join(self) -> Result<T, ExecutorError> {
        self.rx.await.map_err(|_| ExecutorError::Abandoned)
    }

    /// Takes the result if it is already available. Yields the value at
    /// most once.
    pub fn try_join(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").finish_non_exhaustive()
    }
}
