//! Demo command module and the console's hook implementations.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use cmdhub_core::context::InvocationContext;
use cmdhub_core::descriptor::{CommandMethod, MethodDescriptor, ParamSpec};
use cmdhub_core::error::CommandError;
use cmdhub_core::result::CommandResult;
use cmdhub_core::traits::{Authorizer, CommandModule, FnHandler};
use cmdhub_pipeline::{ExceptionConverter, InvokeListener};

/// Failures raised by the demo kick command.
#[derive(Debug, Error)]
pub enum KickError {
    /// No player argument was given.
    #[error("a player name is required")]
    MissingPlayer,
    /// The named player is not online.
    #[error("player '{name}' is not online")]
    PlayerNotFound {
        /// The name that failed to resolve.
        name: String,
    },
}

/// Sample command module registered by the console.
///
/// Carries a small in-memory roster so the kick command has a player
/// lookup that can fail.
#[derive(Debug)]
pub struct DemoModule {
    online: Arc<Vec<String>>,
}

impl DemoModule {
    /// A module with the built-in demo roster.
    pub fn new() -> Self {
        Self::with_players(["alex", "steve"])
    }

    /// A module whose kick command checks against `players`.
    pub fn with_players(players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            online: Arc::new(players.into_iter().map(Into::into).collect()),
        }
    }

    fn ping_method(&self) -> CommandMethod {
        CommandMethod::new(
            MethodDescriptor::new(["ping"], "Check that the console responds"),
            FnHandler::shared(|_ctx| async { Ok(Some(serde_json::json!("pong"))) }),
        )
    }

    fn echo_method(&self) -> CommandMethod {
        let descriptor = MethodDescriptor::new(["echo", "say"], "Repeat the arguments")
            .with_param(ParamSpec::variadic("message"));
        let handler = FnHandler::shared(|ctx| {
            let message = ctx.arguments.clone();
            async move { Ok(Some(serde_json::json!(message))) }
        });
        CommandMethod::new(descriptor, handler)
    }

    fn kick_method(&self) -> CommandMethod {
        let descriptor = MethodDescriptor::new(["kick", "boot"], "Disconnect a player")
            .with_permission("console.kick")
            .with_param(ParamSpec::required("player"))
            .with_param(ParamSpec::variadic("reason"))
            .with_param(ParamSpec::switch("silent", 's'));
        let online = Arc::clone(&self.online);
        let handler = FnHandler::shared(move |ctx| {
            let online = Arc::clone(&online);
            let tokens: Vec<String> = ctx.arg_tokens().into_iter().map(str::to_string).collect();
            async move {
                let silent = tokens.iter().any(|t| t == "-s");
                let mut words = tokens.iter().filter(|t| !t.starts_with('-'));
                let Some(player) = words.next() else {
                    return Err(KickError::MissingPlayer.into());
                };
                if !online.iter().any(|name| name == player) {
                    return Err(KickError::PlayerNotFound {
                        name: player.clone(),
                    }
                    .into());
                }
                let reason: Vec<&str> = words.map(String::as_str).collect();
                let reason = if reason.is_empty() {
                    "Kicked by console".to_string()
                } else {
                    reason.join(" ")
                };
                Ok(Some(serde_json::json!({
                    "player": player,
                    "reason": reason,
                    "silent": silent,
                })))
            }
        });
        CommandMethod::new(descriptor, handler)
    }
}

impl Default for DemoModule {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandModule for DemoModule {
    fn module_name(&self) -> &str {
        "demo"
    }

    fn command_methods(&self) -> Vec<CommandMethod> {
        vec![self.ping_method(), self.echo_method(), self.kick_method()]
    }
}

/// Logs every invocation phase.
#[derive(Debug, Default)]
pub struct LoggingListener;

#[async_trait]
impl InvokeListener for LoggingListener {
    async fn before_invoke(&self, ctx: &InvocationContext) -> CommandResult<()> {
        debug!(
            command = %ctx.command,
            invocation = %ctx.invocation_id,
            "Invocation starting"
        );
        Ok(())
    }

    async fn after_invoke(&self, ctx: &InvocationContext) -> CommandResult<()> {
        debug!(
            command = %ctx.command,
            invocation = %ctx.invocation_id,
            "Invocation finished"
        );
        Ok(())
    }

    async fn on_exception(
        &self,
        ctx: &InvocationContext,
        failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) {
        warn!(command = %ctx.command, error = %failure, "Invocation failed");
    }
}

/// Grants every permission to invocations marked as coming from the
/// console (`locals["console"] == true`) and denies all others.
#[derive(Debug, Default)]
pub struct ConsoleAuthorizer;

#[async_trait]
impl Authorizer for ConsoleAuthorizer {
    async fn check(&self, ctx: &InvocationContext, permission: &str) -> bool {
        let granted = ctx.local_bool("console").unwrap_or(false);
        if !granted {
            debug!(permission = %permission, "Permission denied for non-console invocation");
        }
        granted
    }
}

/// Claims player-lookup failures raised by the demo module.
#[derive(Debug, Default)]
pub struct PlayerErrorConverter;

impl ExceptionConverter for PlayerErrorConverter {
    fn name(&self) -> &str {
        "player"
    }

    fn convert(
        &self,
        _ctx: &InvocationContext,
        failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) -> Option<CommandError> {
        failure
            .downcast_ref::<KickError>()
            .map(|kick| CommandError::failed(kick.to_string()))
    }
}
