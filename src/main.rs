//! CommandHub Console, a demo embedder for the command pipeline.
//!
//! Wires the pipeline crates together: configures hooks, registers the
//! demo module into an alias dispatcher, and evaluates command lines from
//! argv or an interactive stdin loop.

mod config;
mod demo;
mod dispatcher;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cmdhub_core::context::InvocationContext;
use cmdhub_pipeline::PipelineAssembler;

use crate::config::ConsoleConfig;
use crate::demo::{ConsoleAuthorizer, DemoModule, LoggingListener, PlayerErrorConverter};
use crate::dispatcher::{AliasDispatcher, split_line};

/// Interactive console for dispatching demo commands.
#[derive(Debug, Parser)]
#[command(name = "cmdhub-console", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Command line to evaluate once instead of entering the read loop.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    line: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConsoleConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, cli.line).await {
        tracing::error!("Console error: {e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &ConsoleConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(false).init();
        }
    }
}

/// Main console run function
async fn run(config: ConsoleConfig, one_shot: Vec<String>) -> anyhow::Result<()> {
    tracing::info!("Starting CommandHub console v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Configure hooks ──────────────────────────────────
    let mut assembler = PipelineAssembler::new();
    let hooks = assembler.hooks_mut();
    hooks
        .set_authorizer(Some(Arc::new(ConsoleAuthorizer)))
        .context("configuring authorizer")?;
    hooks
        .add_invoke_listener(Some(Arc::new(LoggingListener)))
        .context("configuring invoke listener")?;
    hooks
        .add_exception_converter(Some(Arc::new(PlayerErrorConverter)))
        .context("configuring exception converter")?;

    // ── Step 2: Register the demo module ─────────────────────────
    let mut dispatcher = AliasDispatcher::new();
    let module = DemoModule::new();
    let registered = assembler
        .register_commands(&mut dispatcher, &module)
        .context("registering demo module")?;
    tracing::info!(commands = registered, "Demo module registered");

    // ── Step 3: Evaluate input ───────────────────────────────────
    if one_shot.is_empty() {
        read_loop(&config, &dispatcher).await?;
    } else {
        evaluate(&dispatcher, &one_shot.join(" ")).await;
    }

    // ── Step 4: Drain the executor ───────────────────────────────
    let executor = Arc::clone(assembler.hooks().executor());
    executor.shutdown();
    if !executor.await_termination(Duration::from_secs(5)).await {
        tracing::warn!("Executor did not terminate within the shutdown budget");
    }

    tracing::info!("Console shut down");
    Ok(())
}

/// Interactive read loop over stdin.
async fn read_loop(config: &ConsoleConfig, dispatcher: &AliasDispatcher) -> anyhow::Result<()> {
    use std::io::Write as _;

    use tokio::io::AsyncBufReadExt;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    println!("CommandHub console. Type 'help' for commands, 'exit' to leave.");
    loop {
        print!("{}", config.prompt);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "help" => {
                for help_line in dispatcher.help_lines() {
                    println!("  {help_line}");
                }
            }
            _ => evaluate(dispatcher, &line).await,
        }
    }
    Ok(())
}

/// Evaluates one console line against the dispatcher.
async fn evaluate(dispatcher: &AliasDispatcher, line: &str) {
    let Some((alias, arguments)) = split_line(line) else {
        return;
    };
    let Some(command) = dispatcher.get(alias) else {
        println!("Unknown command '{alias}'. Type 'help' for the command list.");
        return;
    };

    let ctx = InvocationContext::new(alias, arguments)
        .with_string("sender", "console")
        .with_bool("console", true);

    match command.invoke(&ctx).await {
        Ok(Some(serde_json::Value::String(text))) => println!("{text}"),
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => {}
        Err(e) => println!("Error: {e}"),
    }
}
