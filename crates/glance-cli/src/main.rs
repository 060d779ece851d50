//! Glance CLI - explain or fact-check selected text with an LLM
//!
//! Keeps the OpenRouter API key encrypted at rest, builds chat-completion
//! requests and turns raw model output into structured results.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod security;
mod ui;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glance_core::GlanceError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, key, misc, parse, prompt};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        tracing::debug!("command failed: {:#}", e);
        cli_error(&e).exit();
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Map an error to the CLI error that decides the message and exit code.
fn cli_error(err: &anyhow::Error) -> CliError {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.clone();
    }
    if let Some(core_err) = err.downcast_ref::<GlanceError>() {
        return CliError::from(core_err);
    }
    CliError::Failed(format!("{:#}", err))
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Key(command)) => key::handle_key(ctx, command),
        Some(Commands::Parse(args)) => parse::handle_parse(ctx, args),
        Some(Commands::Prompt(args)) => prompt::handle_prompt(ctx, args),
        Some(Commands::Completions(args)) => misc::handle_completions(args.shell),
        None => {
            print_quickstart();
            Ok(())
        }
    }
}

fn print_quickstart() {
    println!("Glance {}", glance_core::VERSION);
    println!();
    println!("Quick start:");
    println!("  glance init                      Write a config file");
    println!("  glance key set                   Encrypt and store your API key");
    println!("  glance prompt explain \"text\"     Build a request for a selection");
    println!("  glance parse --mode fact-check   Structure a model response from stdin");
    println!();
    println!("Run `glance --help` for all commands.");
}
