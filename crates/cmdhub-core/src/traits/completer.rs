//! Completion-suggestion policy.

use async_trait::async_trait;

use crate::context::InvocationContext;

/// Produces completion suggestions for a partially typed invocation.
#[async_trait]
pub trait CommandCompleter: Send + Sync + std::fmt::Debug {
    /// Suggestions for `partial`, most relevant first.
    async fn suggest(&self, partial: &str, ctx: &InvocationContext) -> Vec<String>;
}

/// Default completer: never offers suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCompleter;

#[async_trait]
impl CommandCompleter for EmptyCompleter {
    async fn suggest(&self, _partial: &str, _ctx: &InvocationContext) -> Vec<String> {
        Vec::new()
    }
}
