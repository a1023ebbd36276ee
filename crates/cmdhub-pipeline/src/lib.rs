//! # cmdhub-pipeline
//!
//! The assembly half of CommandHub: the [`HookRegistry`] holding the
//! cross-cutting hooks every command shares, the [`MethodCompiler`] contract
//! (with the built-in [`SimpleMethodCompiler`]), the [`PipelineCallable`]
//! that enforces the invocation pipeline, and the [`PipelineAssembler`]
//! front door that registers whole modules into a dispatcher.

pub mod assembler;
pub mod callable;
pub mod compiler;
pub mod error;
pub mod hooks;

pub use assembler::PipelineAssembler;
pub use callable::PipelineCallable;
pub use compiler::{MethodCompiler, SimpleMethodCompiler};
pub use error::{CompileError, ConfigurationError};
pub use hooks::{ExceptionConverter, HookRegistry, HookSnapshot, InvokeListener};
