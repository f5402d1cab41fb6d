//! # ScaffRS Layout Show Command
//!
//! File: cli/src/commands/layout/show.rs
//!
//! ## Overview
//!
//! Implements `scaffrs layout show <SOURCE>`: prints the layout as a tree
//! together with what the project detector makes of it (project type, build
//! system, languages, technologies) and the headline analysis results.
//!
//! ```bash
//! scaffrs layout show web-app.json
//! scaffrs layout show .
//! ```
//!
use crate::analysis::report::{build_report, StructureReport};
use crate::commands::layout::utils::inputs::{load_source_tree, resolve_hints};
use crate::commands::layout::utils::project_detector::{detect_project, ProjectInfo};
use crate::commands::layout::utils::tree_printer::{render_tree, TreeStyle};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;
use tracing::info;

const RULE_TOP: &str = "┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓";
const RULE_MID: &str = "┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┫";
const RULE_SECTION: &str = "┣--------------------------------------------------------------------┫";
const RULE_BOTTOM: &str = "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛";

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// JSON layout file or existing directory to display.
    pub source: PathBuf,
}

pub async fn handle_show(args: ShowArgs) -> Result<()> {
    info!("Showing layout '{}'", args.source.display());
    let cfg = config::load_config().context("Failed to load ScaffRS configuration")?;
    let root = load_source_tree(&args.source)?;
    let (team_size, preferences) = resolve_hints(&cfg, None, None);
    let report = build_report(&root, team_size, &preferences, &cfg.scoring)
        .with_context(|| format!("Failed to analyze '{}'", args.source.display()))?;
    let project = detect_project(&root, &report.metrics);
    let tree = render_tree(&root, TreeStyle::Bold);

    print!("{}", format_details(&report, &project, &tree));
    Ok(())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None detected".to_string()
    } else {
        items.join(", ")
    }
}

/// Boxed summary: header, project info, structure and headline results.
pub fn format_details(report: &StructureReport, project: &ProjectInfo, tree: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", RULE_TOP);
    let _ = writeln!(out, "┃ 🔎 Layout Details: {}", report.project_name);
    let _ = writeln!(out, "{}", RULE_MID);

    let _ = writeln!(out, "┃ 🛠️  Project Info:");
    let _ = writeln!(out, "┃    - Type:          {}", project.project_type);
    let _ = writeln!(out, "┃    - Build System:  {}", project.build_system);
    let _ = writeln!(out, "┃    - Languages:     {}", list_or_none(&project.languages));
    let _ = writeln!(out, "┃    - Technologies:  {}", list_or_none(&project.technologies));
    let _ = writeln!(out, "{}", RULE_SECTION);

    let _ = writeln!(out, "┃ 📂 File Structure:");
    for line in tree.lines() {
        let _ = writeln!(out, "┃    {}", line);
    }
    let _ = writeln!(out, "{}", RULE_SECTION);

    let primary = report.primary_workflow();
    let _ = writeln!(out, "┃ 📊 Analysis:");
    let _ = writeln!(
        out,
        "┃    - Complexity:    {:.1} ({})",
        report.complexity.score, report.complexity.tier
    );
    let _ = writeln!(
        out,
        "┃    - Workflow:      {} ({:.0}%)",
        primary.kind.display_name(),
        primary.confidence * 100.0
    );
    let _ = writeln!(out, "{}", RULE_BOTTOM);
    out
}
