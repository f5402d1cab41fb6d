//! # ScaffRS Layout Workflows Command
//!
//! File: cli/src/commands/layout/workflows.rs
//!
//! Implements `scaffrs layout workflows`: lists the seven workflows the
//! classifier can recommend. `--steps` also prints each workflow's branching
//! steps, the same ones that end up in a generated CONTRIBUTING.md.
//!
use crate::analysis::workflow::WorkflowKind;
use crate::core::error::Result;
use clap::Parser;
use std::fmt::Write as FmtWrite;
use tracing::info;

#[derive(Parser, Debug)]
pub struct WorkflowsArgs {
    /// Print the branching steps of every workflow.
    #[arg(long)]
    pub steps: bool,
}

pub async fn handle_workflows(args: WorkflowsArgs) -> Result<()> {
    info!("Listing workflow catalogue...");
    print!("{}", format_catalogue(args.steps));
    Ok(())
}

/// Table of every workflow, in classifier declaration order.
pub fn format_catalogue(with_steps: bool) -> String {
    let key_width = WorkflowKind::ALL
        .iter()
        .map(|k| k.key().len())
        .max()
        .unwrap_or(4)
        .max("Key".len());
    let name_width = WorkflowKind::ALL
        .iter()
        .map(|k| k.display_name().len())
        .max()
        .unwrap_or(4)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(out, "\nAvailable workflows:\n");
    let _ = writeln!(
        out,
        "{:<kw$} | {:<nw$} | Description",
        "Key",
        "Name",
        kw = key_width,
        nw = name_width
    );
    let _ = writeln!(
        out,
        "{:-<kw$}-+-{:-<nw$}-+-{:-<50}",
        "",
        "",
        "",
        kw = key_width,
        nw = name_width
    );
    for kind in WorkflowKind::ALL {
        let _ = writeln!(
            out,
            "{:<kw$} | {:<nw$} | {}",
            kind.key(),
            kind.display_name(),
            kind.description(),
            kw = key_width,
            nw = name_width
        );
        if with_steps {
            for (n, step) in kind.branching_steps().iter().enumerate() {
                let _ = writeln!(out, "{:<kw$}     {}. {}", "", n + 1, step, kw = key_width);
            }
        }
    }
    let _ = writeln!(
        out,
        "\nRun 'scaffrs layout analyze <SOURCE>' to see which one fits a layout."
    );
    out
}
