//! # ScaffRS Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates ScaffRS configuration. Settings come
//! from built-in defaults, an optional user file and an optional project file,
//! with command-line flags applied on top by the individual command handlers.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.scaffrs.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/scaffrs/config.toml`
//! 3. Default values defined in the code
//!
//! Sections:
//! - `[scoring]`: normalisation limits used by the complexity scorer
//! - `[workflow]`: default team size and preference string
//! - `[output]`: default parent directory for `layout create` and an optional
//!   template override directory
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let report = complexity::score(&metrics, &cfg.scoring);
//! let prefs = Preferences::parse(&cfg.workflow.preferences);
//! ```
//!
use crate::core::error::{Result, ScaffError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The resolved configuration: built-in defaults with every file layer applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub workflow: WorkflowConfig,
    pub output: OutputConfig,
}

/// Normalisation limits for the complexity scorer.
///
/// Each metric is divided by its limit and clamped to `[0, 1]`, so a tree at or
/// beyond the limit saturates that factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Directory nesting depth treated as "maximally deep".
    pub max_expected_depth: usize,
    /// File count treated as "maximally large" (compared on a log scale).
    pub max_expected_files: usize,
    /// Average branching factor treated as "maximally wide".
    pub max_expected_branching: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            max_expected_depth: 8,
            max_expected_files: 1000,
            max_expected_branching: 10.0,
        }
    }
}

/// Defaults for workflow classification hints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Number of people expected to work on generated projects.
    pub team_size: Option<u32>,
    /// Free-text preference string, e.g. `"fork, include docker"`.
    pub preferences: String,
}

/// Where generated projects are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Parent directory for new projects (can use ~). Will be expanded.
    pub directory: String,
    /// Optional directory of `*.tera` files that extend or replace the
    /// built-in boilerplate templates (can use ~).
    pub templates: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: ".".to_string(),
            templates: None,
        }
    }
}

/// One configuration file as written. Only the keys present in the file are
/// `Some`, so a value equal to the default still overrides a lower layer.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    #[serde(default)]
    scoring: ScoringLayer,
    #[serde(default)]
    workflow: WorkflowLayer,
    #[serde(default)]
    output: OutputLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ScoringLayer {
    max_expected_depth: Option<usize>,
    max_expected_files: Option<usize>,
    max_expected_branching: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct WorkflowLayer {
    team_size: Option<u32>,
    preferences: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct OutputLayer {
    directory: Option<String>,
    templates: Option<String>,
}

impl ConfigLayer {
    /// Overwrites every field of `config` that this layer sets.
    fn apply_to(self, config: &mut Config) {
        let ConfigLayer {
            scoring,
            workflow,
            output,
        } = self;
        if let Some(depth) = scoring.max_expected_depth {
            config.scoring.max_expected_depth = depth;
        }
        if let Some(files) = scoring.max_expected_files {
            config.scoring.max_expected_files = files;
        }
        if let Some(branching) = scoring.max_expected_branching {
            config.scoring.max_expected_branching = branching;
        }
        if let Some(team_size) = workflow.team_size {
            config.workflow.team_size = Some(team_size);
        }
        if let Some(preferences) = workflow.preferences {
            config.workflow.preferences = preferences;
        }
        if let Some(directory) = output.directory {
            config.output.directory = directory;
        }
        if let Some(templates) = output.templates {
            config.output.templates = Some(templates);
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".scaffrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.into_iter().chain(project_config));
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "ScaffRS", "scaffrs") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigLayer>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file (.scaffrs.toml) found in current directory or ancestors.");
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Applies the layers over the defaults in order, so later layers win.
fn merge_configs(layers: impl IntoIterator<Item = ConfigLayer>) -> Config {
    let mut merged = Config::default();
    for layer in layers {
        layer.apply_to(&mut merged);
    }
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.output.directory = shellexpand::tilde(&config.output.directory).into_owned();
    debug!("Expanded output directory: {}", config.output.directory);
    if let Some(templates) = config.output.templates.as_mut() {
        *templates = shellexpand::tilde(templates.as_str()).into_owned();
        debug!("Expanded templates directory: {}", templates);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let scoring = &config.scoring;
    if scoring.max_expected_depth == 0 {
        return Err(anyhow!(ScaffError::Config(
            "scoring.max_expected_depth must be greater than 0".to_string()
        )));
    }
    if scoring.max_expected_files == 0 {
        return Err(anyhow!(ScaffError::Config(
            "scoring.max_expected_files must be greater than 0".to_string()
        )));
    }
    if !(scoring.max_expected_branching.is_finite() && scoring.max_expected_branching > 0.0) {
        return Err(anyhow!(ScaffError::Config(format!(
            "scoring.max_expected_branching must be a positive number, got {}",
            scoring.max_expected_branching
        ))));
    }
    if config.workflow.team_size == Some(0) {
        return Err(anyhow!(ScaffError::Config(
            "workflow.team_size must be at least 1".to_string()
        )));
    }
    let out_dir = Path::new(&config.output.directory);
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(anyhow!(ScaffError::Config(format!(
            "Configured output path '{}' exists but is not a directory.",
            out_dir.display()
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
