//! Permission-check policy.

use async_trait::async_trait;

use crate::context::InvocationContext;

/// Decides whether the caller behind an invocation holds a permission.
///
/// Implemented by the embedding application; the pipeline consults the
/// active authorizer before any other invocation work.
#[async_trait]
pub trait Authorizer: Send + Sync + std::fmt::Debug {
    /// Whether the invocation described by `ctx` holds `permission`.
    async fn check(&self, ctx: &InvocationContext, permission: &str) -> bool;
}

/// Default authorizer: every permission check passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllAuthorizer;

#[async_trait]
impl Authorizer for AllowAllAuthorizer {
    async fn check(&self, _ctx: &InvocationContext, _permission: &str) -> bool {
        true
    }
}
