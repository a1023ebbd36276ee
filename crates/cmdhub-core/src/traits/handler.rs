//! Command bodies and the modules that enumerate them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::InvocationContext;
use crate::descriptor::CommandMethod;
use crate::error::BoxedError;

/// The bound body of one command method.
///
/// Handlers fail with any boxed error; failures that are not already a
/// [`CommandError`](crate::error::CommandError) are offered to the
/// registered exception converters by the pipeline.
#[async_trait]
pub trait CommandHandler: Send + Sync + std::fmt::Debug {
    /// Executes the command body, optionally producing a result value.
    async fn handle(
        &self,
        ctx: &InvocationContext,
    ) -> Result<Option<serde_json::Value>, BoxedError>;
}

/// A host object exposing command methods for registration.
///
/// This is the build-time discovery facility: instead of reflecting over
/// annotations, a module enumerates its descriptor-bound bodies explicitly.
/// Enumeration order across methods is not part of the contract.
pub trait CommandModule: Send + Sync {
    /// Name used in logs when the module's methods are registered.
    fn module_name(&self) -> &str;

    /// The command-bearing methods of this module, each handler already
    /// closed over whatever module state it needs.
    fn command_methods(&self) -> Vec<CommandMethod>;
}

/// A closure-based command handler for quick handler creation.
pub struct FnHandler {
    /// Handler function.
    handler: Arc<
        dyn Fn(
                &InvocationContext,
            ) -> std::pin::Pin<
                Box<
                    dyn std::future::Future<Output = Result<Option<serde_json::Value>, BoxedError>>
                        + Send
                        + '_,
                >,
            > + Send
            + Sync,
    >,
}

impl std::fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl FnHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(&InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Option<serde_json::Value>, BoxedError>>
            + Send
            + 'static,
    {
        Self {
            handler: Arc::new(move |ctx| {
                let fut = handler(ctx);
                Box::pin(fut)
            }),
        }
    }

    /// Wraps a closure into an `Arc<dyn CommandHandler>`.
    pub fn shared<F, Fut>(handler: F) -> Arc<dyn CommandHandler>
    where
        F: Fn(&InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Option<serde_json::Value>, BoxedError>>
            + Send
            + 'static,
    {
        Arc::new(Self::new(handler))
    }
}

#[async_trait]
impl CommandHandler for FnHandler {
    async fn handle(
        &self,
        ctx: &InvocationContext,
    ) -> Result<Option<serde_json::Value>, BoxedError> {
        (self.handler)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_handler_runs_closure() {
        let handler = FnHandler::new(|ctx| {
            let command = ctx.command.clone();
            async move { Ok(Some(serde_json::json!({ "ran": command }))) }
        });
        let ctx = InvocationContext::new("ping", "");
        let outcome = handler.handle(&ctx).await.expect("handler succeeds");
        assert_eq!(outcome, Some(serde_json::json!({ "ran": "ping" })));
    }
}
