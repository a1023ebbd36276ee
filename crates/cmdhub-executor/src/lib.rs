//! # cmdhub-executor
//!
//! Execution strategies for CommandHub. Defines the [`TaskExecutor`]
//! contract command pipelines dispatch bodies through, and the default
//! [`SynchronousExecutor`] that runs every task inline on the calling task
//! while still honoring the full shutdown/termination state machine.
//!
//! This crate has **no** internal dependencies on other CommandHub crates.

pub mod executor;
pub mod synchronous;
pub mod task;

pub use executor::{ExecutorError, TaskExecutor, TaskExecutorExt, TaskFuture};
pub use synchronous::SynchronousExecutor;
pub use task::TaskHandle;
