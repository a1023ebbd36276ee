//! Unified command error types for CommandHub.
//!
//! Hooks and embedders speak [`CommandError`]; anything else coming out of a
//! command body is carried as a [`BoxedError`] until an exception converter
//! claims it.

use thiserror::Error;

/// Boxed error type produced by command bodies and carried by unrecognized
/// failures.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// The recognized command-level error returned from a command invocation.
///
/// A body failure that is already a `CommandError` propagates unchanged;
/// any other failure is offered to the registered exception converters and,
/// if none claims it, surfaces as [`CommandError::Unhandled`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The caller holds none of the permissions attached to the command.
    #[error("not permitted to run '{command}'")]
    PermissionDenied {
        /// Alias the command was invoked under.
        command: String,
    },

    /// The configured executor is shut down and refused the dispatch.
    #[error("command '{command}' was rejected: the executor is shut down")]
    ExecutionRejected {
        /// Alias the command was invoked under.
        command: String,
    },

    /// A recognized command-level failure with a user-facing message.
    #[error("{message}")]
    Failed {
        /// Message shown to the command's invoker.
        message: String,
    },

    /// A failure from the command body that no exception converter claimed.
    #[error("command '{command}' failed: {source}")]
    Unhandled {
        /// Alias the command was invoked under.
        command: String,
        /// Names of the converters consulted, in consultation order.
        consulted: Vec<String>,
        /// The original failure.
        #[source]
        source: BoxedError,
    },
}

impl CommandError {
    /// Create a permission-denied error for the named command.
    pub fn permission_denied(command: impl Into<String>) -> Self {
        Self::PermissionDenied {
            command: command.into(),
        }
    }

    /// Create an execution-rejected error for the named command.
    pub fn execution_rejected(command: impl Into<String>) -> Self {
        Self::ExecutionRejected {
            command: command.into(),
        }
    }

    /// Create a recognized failure with a user-facing message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Create an unhandled-failure error wrapping the original cause.
    pub fn unhandled(
        command: impl Into<String>,
        consulted: Vec<String>,
        source: BoxedError,
    ) -> Self {
        Self::Unhandled {
            command: command.into(),
            consulted,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("backing store offline")]
    struct StoreOffline;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CommandError::permission_denied("kick").to_string(),
            "not permitted to run 'kick'"
        );
        assert_eq!(
            CommandError::failed("player is not online").to_string(),
            "player is not online"
        );
        assert_eq!(
            CommandError::execution_rejected("kick").to_string(),
            "command 'kick' was rejected: the executor is shut down"
        );
    }

    #[test]
    fn test_unhandled_preserves_source() {
        let err = CommandError::unhandled("save", vec!["io".into()], Box::new(StoreOffline));
        assert_eq!(err.to_string(), "command 'save' failed: backing store offline");
        let source = std::error::Error::source(&err).expect("source retained");
        assert_eq!(source.to_string(), "backing store offline");
    }
}
