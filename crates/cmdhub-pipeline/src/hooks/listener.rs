//! Listeners observing and intercepting command invocations.

use async_trait::async_trait;

use cmdhub_core::context::InvocationContext;
use cmdhub_core::result::CommandResult;

/// Observes the phases of a command invocation.
///
/// Listeners are notified in registration order. Every method has a no-op
/// default, so implementations override only the phases they care about.
#[async_trait]
pub trait InvokeListener: Send + Sync + std::fmt::Debug {
    /// Called after authorization and before the command body runs.
    ///
    /// Returning an error aborts the invocation: remaining listeners are
    /// skipped and the body never runs.
    async fn before_invoke(&self, ctx: &InvocationContext) -> CommandResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called after the command body completes successfully. An error here
    /// replaces the invocation's successful outcome.
    async fn after_invoke(&self, ctx: &InvocationContext) -> CommandResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Observes a failing invocation before exception conversion runs.
    async fn on_exception(
        &self,
        ctx: &InvocationContext,
        failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) {
        let _ = (ctx, failure);
    }
}
