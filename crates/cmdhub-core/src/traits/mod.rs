//! Collaborator traits defined in `cmdhub-core` and implemented by the
//! pipeline crate or by embedding applications.

pub mod authorizer;
pub mod callable;
pub mod completer;
pub mod dispatcher;
pub mod handler;

pub use authorizer::{AllowAllAuthorizer, Authorizer};
pub use callable::CommandCallable;
pub use completer::{CommandCompleter, EmptyCompleter};
pub use dispatcher::Dispatcher;
pub use handler::{CommandHandler, CommandModule, FnHandler};
