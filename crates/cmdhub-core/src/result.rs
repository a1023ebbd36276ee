//! Convenience result type alias for CommandHub.

use crate::error::CommandError;

/// A specialized `Result` type for command invocations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, CommandError>` explicitly.
pub type CommandResult<T> = Result<T, CommandError>;
