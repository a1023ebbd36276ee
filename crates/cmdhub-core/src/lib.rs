//! # cmdhub-core
//!
//! Core crate for CommandHub. Contains the invocation context, command
//! descriptors, the collaborator traits implemented by embedding
//! applications, and the unified command error.
//!
//! This crate has **no** internal dependencies on other CommandHub crates.

pub mod context;
pub mod descriptor;
pub mod error;
pub mod result;
pub mod traits;

pub use context::InvocationContext;
pub use descriptor::{CommandDescriptor, CommandMethod, MethodDescriptor, ParamKind, ParamSpec};
pub use error::{BoxedError, CommandError};
pub use result::CommandResult;
pub use traits::{
    AllowAllAuthorizer, Authorizer, CommandCallable, CommandCompleter, CommandHandler,
    CommandModule, Dispatcher, EmptyCompleter, FnHandler,
};
