//! # ScaffRS Layout Command Group
//!
//! File: cli/src/commands/layout/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `scaffrs layout`. Every subcommand takes a
//! layout, either a JSON tree file or an existing directory, and runs it
//! through the analysis engine in `crate::analysis`.
//!
//! ## Architecture
//!
//! - `LayoutArgs`: top-level arguments for the group.
//! - `LayoutCommand`: one variant per subcommand, each holding its own args.
//! - `handle_layout`: dispatches to the subcommand handler.
//!
//! Subcommand logic lives in `analyze.rs`, `show.rs`, `create.rs` and
//! `workflows.rs`; helpers shared between them are in `utils`.
//!
//! ## Examples
//!
//! ```bash
//! scaffrs layout analyze web-app.json --team-size 3
//! scaffrs layout show ./existing-repo
//! scaffrs layout create web-app.json my-app --prefs "include ci"
//! scaffrs layout workflows --steps
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod analyze;
mod create;
mod show;
mod workflows;
/// Layout loading, detection, tree rendering and boilerplate generation.
pub mod utils;

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    #[command(subcommand)]
    command: LayoutCommand,
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    /// Analyze a layout and recommend a git workflow.
    Analyze(analyze::AnalyzeArgs),
    /// Print a layout as a tree with detected project details.
    Show(show::ShowArgs),
    /// Generate a project with boilerplate from a layout.
    Create(create::CreateArgs),
    /// List the workflows the analyzer can recommend.
    Workflows(workflows::WorkflowsArgs),
}

pub async fn handle_layout(args: LayoutArgs) -> Result<()> {
    match args.command {
        LayoutCommand::Analyze(args) => analyze::handle_analyze(args).await?,
        LayoutCommand::Show(args) => show::handle_show(args).await?,
        LayoutCommand::Create(args) => create::handle_create(args).await?,
        LayoutCommand::Workflows(args) => workflows::handle_workflows(args).await?,
    }
    Ok(())
}
