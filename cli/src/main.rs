//! # ScaffRS Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the ScaffRS CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - `analysis`: the structural analysis engine (tree model, metrics,
//!   workflow classification, complexity scoring)
//! - `commands`: CLI command groups built on top of the engine
//! - `core`: configuration, errors and templating
//! - `common`: filesystem helpers
//!
//! All errors are propagated to this level, printed as `Error: ...` on
//! stderr, and turned into exit code 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! scaffrs --help
//!
//! # Analyze a layout with increased verbosity
//! scaffrs -vv layout analyze web-app.json
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod analysis; // Layout metrics, workflow recommendation, complexity scoring
mod commands; // Handles specific command logic
mod common; // Shared filesystem utilities
mod core; // Core infrastructure (errors, config, templating)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "scaffrs",
    about = "🦀 ScaffRS 🌳: Project Layout Analysis & Scaffolding",
    long_about = "Analyze project directory layouts, recommend a git collaboration workflow,\n\
                  score structural complexity and scaffold projects with matching boilerplate.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "l")]
    Layout(commands::layout::LayoutArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Layout(args) => commands::layout::handle_layout(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn scaffrs_cmd() -> Command {
        Command::cargo_bin("scaffrs").expect("Failed to find scaffrs binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        scaffrs_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("layout"));
    }
    #[test]
    fn test_main_version_flag() {
        scaffrs_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
