//! The default, inline execution strategy.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::executor::{ExecutorError, TaskExecutor, TaskFuture};

/// Tracked under the state lock. The executor is active while `shutdown` is
/// false, shutting down while `shutdown` is true with tasks still running,
/// and terminated once `shutdown` is true and `running_tasks` is zero.
/// Terminated is absorbing: no operation leaves it.
#[derive(Debug, Default)]
struct ExecState {
    running_tasks: usize,
    shutdown: bool,
}

/// An executor that runs every task inline on the calling task.
///
/// No queue and no worker threads: `execute` awaits the task itself and
/// returns when it finishes. What remains of the executor contract is the
/// lifecycle, which this type implements fully, so pipelines built against
/// [`TaskExecutor`] behave the same here as on a pooled strategy: work is
/// rejected after shutdown, and termination waiters are woken exactly when
/// the last in-flight task finishes after shutdown was requested (or
/// immediately, when shutdown finds nothing in flight).
#[derive(Debug, Default)]
pub struct SynchronousExecutor {
    /// Guards both state fields. Held only for state flips, never while a
    /// task runs.
    state: Mutex<ExecState>,
    /// Signalled on the transition into the terminated state.
    terminated: Notify,
}

impl SynchronousExecutor {
    /// Creates an active executor with no work in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers a poisoned lock; bookkeeping must survive panicking tasks.
    fn lock_state(&self) -> MutexGuard<'_, ExecState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rejects work after shutdown, otherwise marks one more task running.
    fn begin_task(&self) -> Result<(), ExecutorError> {
        let mut state = self.lock_state();
        if state.shutdown {
            return Err(ExecutorError::Rejected);
        }
        state.running_tasks += 1;
        Ok(())
    }

    /// Marks one task finished and wakes termination waiters on the
    /// transition to zero running tasks while shut down.
    fn end_task(&self) {
        let mut state = self.lock_state();
        state.running_tasks -= 1;
        if state.running_tasks == 0 && state.shutdown {
            self.terminated.notify_waiters();
        }
    }
}

/// Decrements the running-task count even when the task panics or the
/// `execute` future is dropped mid-task.
struct TaskGuard<'a> {
    executor: &'a SynchronousExecutor,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.executor.end_task();
    }
}

#[async_trait]
impl TaskExecutor for SynchronousExecutor {
    async fn execute(&self, task: TaskFuture) -> Result<(), ExecutorError> {
        self.begin_task()?;
        let _guard = TaskGuard { executor: self };
        task.await;
        Ok(())
    }

    fn shutdown(&self) {
        {
            let mut state = self.lock_state();
            state.shutdown = true;
            if state.running_tasks == 0 {
                self.terminated.notify_waiters();
            }
        }
        debug!("Executor shut down, new work is rejected");
    }

    fn shutdown_now(&self) -> Vec<TaskFuture> {
        self.shutdown();
        // Work always runs inline, so there is never a queue to drain.
        Vec::new()
    }

    fn is_shutdown(&self) -> bool {
        self.lock_state().shutdown
    }

    fn is_terminated(&self) -> bool {
        let state = self.lock_state();
        state.shutdown && state.running_tasks == 0
    }

    async fn await_termination(&self, timeout: Duration) -> bool {
        // A timeout too large to represent as a deadline waits unbounded.
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let notified = self.terminated.notified();
            tokio::pin!(notified);
            // Register interest before the predicate check so a wake landing
            // between the check and the wait cannot be lost.
            notified.as_mut().enable();
            if self.is_terminated() {
                return true;
            }
            match deadline {
                Some(deadline) => {
                    if time::timeout_at(deadline, notified).await.is_err() {
                        return self.is_terminated();
                    }
                }
                None => notified.await,
            }
        }
    }
}
