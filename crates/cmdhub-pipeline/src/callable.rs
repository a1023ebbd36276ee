//! The compiled, invocable form of a command method.
//!
//! Every invocation runs the same pipeline:
//! 1. authorization, before any other work;
//! 2. before-listeners, in registration order (an error aborts here);
//! 3. the bound body, dispatched through the snapshot's executor;
//! 4. after-listeners on success, or exception listeners observing the raw
//!    failure;
//! 5. exception conversion, newest converter first, for failures that are
//!    not already recognized command errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use cmdhub_core::context::InvocationContext;
use cmdhub_core::descriptor::MethodDescriptor;
use cmdhub_core::error::{BoxedError, CommandError};
use cmdhub_core::result::CommandResult;
use cmdhub_core::traits::{CommandCallable, CommandHandler};
use cmdhub_executor::{ExecutorError, TaskExecutorExt};

use crate::hooks::registry::HookSnapshot;

/// A command method wired through the hook pipeline.
///
/// Holds the hooks captured when the command was built; later registry
/// mutations never reach an already-built command.
#[derive(Debug)]
pub struct PipelineCallable {
    descriptor: MethodDescriptor,
    handler: Arc<dyn CommandHandler>,
    hooks: HookSnapshot,
}

impl PipelineCallable {
    /// Wires `handler` through `hooks` under `descriptor`'s metadata.
    pub fn new(
        descriptor: MethodDescriptor,
        handler: Arc<dyn CommandHandler>,
        hooks: HookSnapshot,
    ) -> Self {
        Self {
            descriptor,
            handler,
            hooks,
        }
    }

    fn dispatch_failure(&self, ctx: &InvocationContext, err: ExecutorError) -> CommandError {
        match err {
            ExecutorError::Rejected => CommandError::execution_rejected(&ctx.command),
            ExecutorError::Abandoned => CommandError::failed(format!(
                "command '{}' was abandoned by its execution strategy",
                ctx.command
            )),
        }
    }

    /// Recognized failures pass through unchanged; anything else is offered
    /// to the converters, most recently registered first.
    fn translate(&self, ctx: &InvocationContext, failure: BoxedError) -> CommandError {
        let failure = match failure.downcast::<CommandError>() {
            Ok(recognized) => return *recognized,
            Err(failure) => failure,
        };

        let mut consulted = Vec::new();
        for converter in &self.hooks.exception_converters {
            consulted.push(converter.name().to_string());
            if let Some(converted) = converter.convert(ctx, failure.as_ref()) {
                debug!(
                    command = %ctx.command,
                    converter = %converter.name(),
                    "Converter claimed command failure"
                );
                return converted;
            }
        }

        warn!(
            command = %ctx.command,
            consulted = consulted.len(),
            error = %failure,
            "No exception converter claimed the failure"
        );
        CommandError::unhandled(&ctx.command, consulted, failure)
    }
}

#[async_trait]
impl CommandCallable for PipelineCallable {
    async fn invoke(&self, ctx: &InvocationContext) -> CommandResult<Option<serde_json::Value>> {
        debug!(
            command = %ctx.command,
            invocation = %ctx.invocation_id,
            "Invoking command"
        );

        // Authorization comes before any other invocation work.
        if !self.test_permission(ctx).await {
            return Err(CommandError::permission_denied(&ctx.command));
        }

        for listener in &self.hooks.invoke_listeners {
            listener.before_invoke(ctx).await?;
        }

        let handler = Arc::clone(&self.handler);
        let body_ctx = ctx.clone();
        let handle = self
            .hooks
            .executor
            .submit(async move { handler.handle(&body_ctx).await })
            .await
            .map_err(|err| self.dispatch_failure(ctx, err))?;
        let outcome = handle
            .join()
            .await
            .map_err(|err| self.dispatch_failure(ctx, err))?;

        match outcome {
            Ok(value) => {
                for listener in &self.hooks.invoke_listeners {
                    listener.after_invoke(ctx).await?;
                }
                debug!(
                    command = %ctx.command,
                    invocation = %ctx.invocation_id,
                    "Command completed"
                );
                Ok(value)
            }
            Err(failure) => {
                for listener in &self.hooks.invoke_listeners {
                    listener.on_exception(ctx, failure.as_ref()).await;
                }
                Err(self.translate(ctx, failure))
            }
        }
    }

    async fn suggest(&self, partial: &str, ctx: &InvocationContext) -> Vec<String> {
        self.hooks.completer.suggest(partial, ctx).await
    }

    async fn test_permission(&self, ctx: &InvocationContext) -> bool {
        if self.descriptor.permissions.is_empty() {
            return true;
        }
        for permission in &self.descriptor.permissions {
            if self.hooks.authorizer.check(ctx, permission).await {
                return true;
            }
        }
        false
    }

    fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }
}
