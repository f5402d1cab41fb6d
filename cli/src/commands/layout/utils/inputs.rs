//! # ScaffRS Layout Inputs
//!
//! File: cli/src/commands/layout/utils/inputs.rs
//!
//! Shared argument handling for the `layout` subcommands: reading the layout
//! source and merging CLI hints over the configured defaults.
//!
use crate::analysis::preferences::Preferences;
use crate::analysis::tree::TreeNode;
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tracing::{debug, info};

/// Loads a layout from a JSON file or an existing directory.
///
/// A JSON layout's root is named after the file stem (`web-app.json` gives
/// `web-app`).
pub fn load_source_tree(source: &Path) -> Result<TreeNode> {
    if source.is_dir() {
        info!("Reading layout from directory '{}'", source.display());
        return TreeNode::from_path(source)
            .with_context(|| format!("Failed to read layout from '{}'", source.display()));
    }

    let raw = io::read_file_to_string(source)
        .with_context(|| format!("Failed to read layout file: {}", source.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Layout file '{}' is not valid JSON", source.display()))?;
    let root_name = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "project".to_string());
    debug!("Parsing JSON layout '{}' as '{}'", source.display(), root_name);
    TreeNode::from_json(&root_name, &value)
        .with_context(|| format!("Invalid layout in '{}'", source.display()))
}

/// Team size and preferences for one run: CLI flags win over configuration,
/// and preference strings from both sources are combined.
pub fn resolve_hints(
    cfg: &Config,
    team_size: Option<u32>,
    prefs: Option<&str>,
) -> (Option<u32>, Preferences) {
    let team_size = team_size.or(cfg.workflow.team_size);
    let configured = Preferences::parse(&cfg.workflow.preferences);
    let preferences = match prefs {
        Some(raw) => configured.union(&Preferences::parse(raw)),
        None => configured,
    };
    debug!("Resolved hints: team_size={:?}, preferences={:?}", team_size, preferences);
    (team_size, preferences)
}

/// Parses `--team-size`; zero is rejected.
pub fn parse_team_size(s: &str) -> std::result::Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) => Err("team size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid team size '{}': {}", s, e)),
    }
}
