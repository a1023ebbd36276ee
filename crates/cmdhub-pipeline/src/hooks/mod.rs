//! Cross-cutting hooks consulted around every command invocation.

pub mod converter;
pub mod listener;
pub mod registry;

pub use converter::ExceptionConverter;
pub use listener::InvokeListener;
pub use registry::{HookRegistry, HookSnapshot};
