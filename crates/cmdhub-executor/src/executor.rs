//! The executor contract command pipelines dispatch work through.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::task::TaskHandle;

/// A boxed unit of work accepted by an executor.
pub type TaskFuture = BoxFuture<'static, ()>;

/// Errors surfaced by executor operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor is shut down; new work is not accepted.
    #[error("executor is shut down; new work is rejected")]
    Rejected,
    /// The task was dropped by its execution strategy before producing a
    /// result.
    #[error("task was dropped before it produced a result")]
    Abandoned,
}

/// An execution strategy with a shutdown lifecycle.
///
/// The command pipeline only ever talks to this trait, so dispatch behaves
/// identically whether the strategy runs work inline (the default
/// [`SynchronousExecutor`](crate::SynchronousExecutor)) or hands it to a
/// real pool. The lifecycle is one-way: active, then shut down while
/// in-flight work drains, then terminated.
#[async_trait]
pub trait TaskExecutor: Send + Sync + std::fmt::Debug {
    /// Runs `task` under this strategy.
    ///
    /// Fails with [`ExecutorError::Rejected`] once the executor is shut
    /// down; the task then never runs. A panicking task propagates to the
    /// caller after the executor's bookkeeping is updated.
    async fn execute(&self, task: TaskFuture) -> Result<(), ExecutorError>;

    /// Requests shutdown. Already-running work is never interrupted; new
    /// work is rejected from this point on.
    fn shutdown(&self);

    /// Requests shutdown and returns the tasks that were accepted but never
    /// started.
    fn shutdown_now(&self) -> Vec<TaskFuture>;

    /// Whether shutdown has been requested.
    fn is_shutdown(&self) -> bool;

    /// Whether shutdown has been requested and no work remains in flight.
    fn is_terminated(&self) -> bool;

    /// Waits until the executor is terminated or `timeout` elapses, and
    /// returns whether termination was observed.
    async fn await_termination(&self, timeout: Duration) -> bool;
}

/// Typed submission helpers layered over the object-safe [`TaskExecutor`].
///
/// Blanket-implemented for every executor, including trait objects, so
/// callers holding an `Arc<dyn TaskExecutor>` get `submit` for free.
#[async_trait]
pub trait TaskExecutorExt: TaskExecutor {
    /// Runs `task` and hands back a handle to its result.
    ///
    /// With a synchronous strategy the handle is already resolved by the
    /// time `submit` returns; [`TaskHandle::try_join`] yields the value
    /// without waiting.
    async fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.execute(Box::pin(async move {
            let _ = tx.send(task.await);
        }))
        .await?;
        Ok(TaskHandle::new(rx))
    }

    /// Runs result-less `task` and resolves the returned handle with
    /// `result` once it completes.
    async fn submit_with<F, T>(&self, task: F, result: T) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: Future<Output = ()> + Send + 'static,
        T: Send + 'static,
    {
        self.submit(async move {
            task.await;
            result
        })
        .await
    }
}

impl<E: TaskExecutor + ?Sized> TaskExecutorExt for E {}
