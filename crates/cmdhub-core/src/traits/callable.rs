//! The invocable form of a compiled command.

use async_trait::async_trait;

use crate::context::InvocationContext;
use crate::descriptor::MethodDescriptor;
use crate::result::CommandResult;

/// An invocable, pre-bound representation of a command ready for dispatch.
///
/// Produced by a method compiler; dispatchers hold these behind their alias
/// index and call [`invoke`](CommandCallable::invoke) per matched line.
#[async_trait]
pub trait CommandCallable: Send + Sync + std::fmt::Debug {
    /// Runs the command's full invocation pipeline.
    async fn invoke(&self, ctx: &InvocationContext) -> CommandResult<Option<serde_json::Value>>;

    /// Completion suggestions for a partially typed invocation.
    async fn suggest(&self, partial: &str, ctx: &InvocationContext) -> Vec<String>;

    /// Whether the invocation's caller may run this command. True when the
    /// descriptor carries no permissions, otherwise when any one of them is
    /// granted.
    async fn test_permission(&self, ctx: &InvocationContext) -> bool;

    /// The compiled method's metadata, for dispatchers and help output.
    fn descriptor(&self) -> &MethodDescriptor;
}
