//! Integration tests for the module-to-dispatch pipeline.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use cmdhub_core::context::InvocationContext;
use cmdhub_core::descriptor::{CommandDescriptor, CommandMethod, MethodDescriptor, ParamSpec};
use cmdhub_core::error::CommandError;
use cmdhub_core::result::CommandResult;
use cmdhub_core::traits::{CommandCallable, CommandModule, Dispatcher, FnHandler};
use cmdhub_pipeline::{CompileError, ExceptionConverter, InvokeListener, PipelineAssembler};

type EventLog = Arc<Mutex<Vec<String>>>;

fn make_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn record(log: &EventLog, event: impl Into<String>) {
    log.lock().unwrap().push(event.into());
}

fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Alias map standing in for an embedding application's dispatcher.
#[derive(Debug, Default)]
struct MapDispatcher {
    commands: HashMap<String, Arc<dyn CommandCallable>>,
}

impl MapDispatcher {
    fn get(&self, alias: &str) -> &Arc<dyn CommandCallable> {
        self.commands.get(alias).expect("alias registered")
    }

    fn contains(&self, alias: &str) -> bool {
        self.commands.contains_key(alias)
    }
}

impl Dispatcher for MapDispatcher {
    fn register_command(&mut self, command: CommandDescriptor) {
        for alias in command.aliases() {
            self.commands
                .insert(alias.clone(), Arc::clone(command.callable()));
        }
    }
}

struct TestModule {
    methods: Vec<CommandMethod>,
}

impl CommandModule for TestModule {
    fn module_name(&self) -> &str {
        "test-module"
    }

    fn command_methods(&self) -> Vec<CommandMethod> {
        self.methods.clone()
    }
}

#[derive(Debug)]
struct TraceListener {
    name: &'static str,
    log: EventLog,
}

#[async_trait]
impl InvokeListener for TraceListener {
    async fn before_invoke(&self, _ctx: &InvocationContext) -> CommandResult<()> {
        record(&self.log, format!("{}:before", self.name));
        Ok(())
    }

    async fn after_invoke(&self, _ctx: &InvocationContext) -> CommandResult<()> {
        record(&self.log, format!("{}:after", self.name));
        Ok(())
    }

    async fn on_exception(
        &self,
        _ctx: &InvocationContext,
        _failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) {
        record(&self.log, format!("{}:exception", self.name));
    }
}

#[derive(Debug)]
struct TraceConverter {
    name: &'static str,
    log: EventLog,
}

impl ExceptionConverter for TraceConverter {
    fn name(&self) -> &str {
        self.name
    }

    fn convert(
        &self,
        _ctx: &InvocationContext,
        _failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) -> Option<CommandError> {
        record(&self.log, format!("{}:convert", self.name));
        Some(CommandError::failed(format!("translated by {}", self.name)))
    }
}

fn echoing_method(aliases: &[&str]) -> CommandMethod {
    CommandMethod::new(
        MethodDescriptor::new(aliases.iter().copied(), "Echo the invoked alias"),
        FnHandler::shared(|ctx| {
            let alias = ctx.command.clone();
            async move { Ok(Some(serde_json::json!(alias))) }
        }),
    )
}

fn failing_method(aliases: &[&str], log: &EventLog) -> CommandMethod {
    let log = Arc::clone(log);
    CommandMethod::new(
        MethodDescriptor::new(aliases.iter().copied(), "Fail with a raw error"),
        FnHandler::shared(move |_ctx| {
            let log = Arc::clone(&log);
            async move {
                record(&log, "body");
                Err("inventory store offline".into())
            }
        }),
    )
}

#[tokio::test]
async fn test_registered_module_dispatches_under_every_alias() {
    let assembler = PipelineAssembler::new();
    let module = TestModule {
        methods: vec![echoing_method(&["tp", "teleport"])],
    };
    let mut dispatcher = MapDispatcher::default();

    let registered = assembler
        .register_commands(&mut dispatcher, &module)
        .unwrap();
    assert_eq!(registered, 1);

    let ctx = InvocationContext::new("teleport", "steve spawn");
    let outcome = dispatcher.get("teleport").invoke(&ctx).await.unwrap();
    assert_eq!(outcome, Some(serde_json::json!("teleport")));
    assert!(dispatcher.contains("tp"));
}

#[tokio::test]
async fn test_hooks_wrap_dispatched_commands_in_order() {
    let log = make_log();
    let mut assembler = PipelineAssembler::new();
    assembler
        .hooks_mut()
        .add_invoke_listener(Some(Arc::new(TraceListener {
            name: "L1",
            log: Arc::clone(&log),
        })))
        .unwrap();
    assembler
        .hooks_mut()
        .add_invoke_listener(Some(Arc::new(TraceListener {
            name: "L2",
            log: Arc::clone(&log),
        })))
        .unwrap();
    assembler
        .hooks_mut()
        .add_exception_converter(Some(Arc::new(TraceConverter {
            name: "general",
            log: Arc::clone(&log),
        })))
        .unwrap();
    assembler
        .hooks_mut()
        .add_exception_converter(Some(Arc::new(TraceConverter {
            name: "specific",
            log: Arc::clone(&log),
        })))
        .unwrap();

    let module = TestModule {
        methods: vec![failing_method(&["drop"], &log)],
    };
    let mut dispatcher = MapDispatcher::default();
    assembler
        .register_commands(&mut dispatcher, &module)
        .unwrap();

    let ctx = InvocationContext::new("drop", "dirt");
    let err = dispatcher.get("drop").invoke(&ctx).await.unwrap_err();

    // Listeners run first-registered first; the most recently registered
    // converter claims the failure before the older one is consulted.
    assert!(matches!(err, CommandError::Failed { message } if message == "translated by specific"));
    assert_eq!(
        events(&log),
        vec![
            "L1:before",
            "L2:before",
            "body",
            "L1:exception",
            "L2:exception",
            "specific:convert",
        ]
    );
}

#[tokio::test]
async fn test_compile_failure_keeps_earlier_commands_dispatchable() {
    let assembler = PipelineAssembler::new();
    let bad = CommandMethod::new(
        MethodDescriptor::new(["kick"], "")
            .with_param(ParamSpec::required("player"))
            .with_param(ParamSpec::required("player")),
        FnHandler::shared(|_ctx| async { Ok(None) }),
    );
    let module = TestModule {
        methods: vec![echoing_method(&["ping"]), bad, echoing_method(&["echo"])],
    };
    let mut dispatcher = MapDispatcher::default();

    let err = assembler
        .register_commands(&mut dispatcher, &module)
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::DuplicateParam {
            method: "kick".to_string(),
            param: "player".to_string(),
        }
    );

    // Registration aborted after the first command; the failing and the
    // following one never reached the dispatcher.
    assert!(dispatcher.contains("ping"));
    assert!(!dispatcher.contains("kick"));
    assert!(!dispatcher.contains("echo"));

    let ctx = InvocationContext::new("ping", "");
    let outcome = dispatcher.get("ping").invoke(&ctx).await.unwrap();
    assert_eq!(outcome, Some(serde_json::json!("ping")));
}

#[tokio::test]
async fn test_executor_shutdown_rejects_later_dispatches() {
    let assembler = PipelineAssembler::new();
    let module = TestModule {
        methods: vec![echoing_method(&["ping"])],
    };
    let mut dispatcher = MapDispatcher::default();
    assembler
        .register_commands(&mut dispatcher, &module)
        .unwrap();

    let ctx = InvocationContext::new("ping", "");
    assert!(dispatcher.get("ping").invoke(&ctx).await.is_ok());

    let executor = Arc::clone(assembler.hooks().executor());
    executor.shutdown();

    let err = dispatcher.get("ping").invoke(&ctx).await.unwrap_err();
    assert!(matches!(err, CommandError::ExecutionRejected { command } if command == "ping"));
    assert!(executor.await_termination(Duration::from_secs(1)).await);
}
