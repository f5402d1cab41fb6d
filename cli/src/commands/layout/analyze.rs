//! # ScaffRS Layout Analyze Command
//!
//! File: cli/src/commands/layout/analyze.rs
//!
//! ## Overview
//!
//! Implements `scaffrs layout analyze <SOURCE>`: runs the analyzer, the
//! workflow classifier and the complexity scorer on a layout and prints the
//! combined report, either as a readable summary or as JSON (`--json`).
//!
//! ## Examples
//!
//! ```bash
//! scaffrs layout analyze web-app.json
//! scaffrs layout analyze ./my-repo --team-size 3 --prefs "include ci"
//! scaffrs layout analyze web-app.json --json | jq '.workflows[0]'
//! ```
//!
use crate::analysis::report::{build_report, StructureReport};
use crate::commands::layout::utils::inputs::{load_source_tree, parse_team_size, resolve_hints};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// JSON layout file or existing directory to analyze.
    pub source: PathBuf,

    /// Number of people working on the project (overrides `workflow.team_size`).
    #[arg(long, value_parser = parse_team_size)]
    pub team_size: Option<u32>,

    /// Preference hints, e.g. "fork, include docker" (added to `workflow.preferences`).
    /// Known hints are also picked out of longer phrases such as "fork include-docker".
    #[arg(long)]
    pub prefs: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    info!("Analyzing layout '{}'", args.source.display());
    let cfg = config::load_config().context("Failed to load ScaffRS configuration")?;
    let root = load_source_tree(&args.source)?;
    let (team_size, preferences) = resolve_hints(&cfg, args.team_size, args.prefs.as_deref());

    let report = build_report(&root, team_size, &preferences, &cfg.scoring)
        .with_context(|| format!("Failed to analyze '{}'", args.source.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Human-readable summary of a report.
pub fn format_report(report: &StructureReport) -> String {
    let m = &report.metrics;
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let mut out = String::new();

    let _ = writeln!(out, "\nLayout: {}", report.project_name);
    let _ = writeln!(
        out,
        "  Depth: {}   Files: {}   Directories: {}   Avg branching: {:.2}",
        m.max_depth, m.total_files, m.total_directories, m.average_branching_factor
    );
    let _ = writeln!(
        out,
        "  Tests folder: {}   Docs folder: {}   CI config: {}",
        yes_no(m.has_tests_folder),
        yes_no(m.has_docs_folder),
        yes_no(m.has_ci_config)
    );
    if !m.extension_counts.is_empty() {
        let extensions: Vec<String> = m
            .extension_counts
            .iter()
            .map(|(ext, n)| {
                let label = if ext.is_empty() { "(none)" } else { ext.as_str() };
                format!("{} ({})", label, n)
            })
            .collect();
        let _ = writeln!(out, "  Extensions: {}", extensions.join(", "));
    }

    let c = &report.complexity;
    let _ = writeln!(out, "\nComplexity: {:.1} ({})", c.score, c.tier);
    for (factor, weight) in &c.contributing_factors {
        let _ = writeln!(out, "  {:<10} {:>5.1}", factor, weight * 100.0);
    }

    let _ = writeln!(out, "\nRecommended workflows:");
    for (rank, rec) in report.workflows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<26} {:>3.0}%",
            rank + 1,
            rec.kind.display_name(),
            rec.confidence * 100.0
        );
        for reason in &rec.rationale {
            let _ = writeln!(out, "     - {}", reason);
        }
    }
    out
}
