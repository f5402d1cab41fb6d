//! # ScaffRS Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module owns the Tera instance used to render boilerplate. The built-in
//! templates live in `cli/templates/*.tera` and are embedded into the binary at
//! compile time, so `scaffrs` never depends on files next to the executable.
//!
//! ## Architecture
//!
//! - `TemplateEngine::new()` registers every embedded template under its short
//!   name (`python`, `readme`, `github_workflow`, ...).
//! - `TemplateEngine::with_overrides(dir)` additionally loads `*.tera` files
//!   from a directory; a file named like a built-in template replaces it.
//! - `render(name, context)` renders one template.
//!
//! Autoescaping is disabled: the output is source code and plain text, not HTML
//! served to a browser.
//!
//! ## Examples
//!
//! ```rust
//! let engine = TemplateEngine::new()?;
//! let mut context = tera::Context::new();
//! context.insert("project_name", "my-app");
//! let license = engine.render("license", &context)?;
//! ```
//!
use crate::core::error::ScaffError;
use std::path::Path;
use tera::Tera;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name and source of every embedded template.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("contributing", include_str!("../../templates/contributing.tera")),
    ("css", include_str!("../../templates/css.tera")),
    ("dockerfile", include_str!("../../templates/dockerfile.tera")),
    ("generic", include_str!("../../templates/generic.tera")),
    ("github_workflow", include_str!("../../templates/github_workflow.tera")),
    ("gitignore", include_str!("../../templates/gitignore.tera")),
    ("go", include_str!("../../templates/go.tera")),
    ("html", include_str!("../../templates/html.tera")),
    ("javascript", include_str!("../../templates/javascript.tera")),
    ("json", include_str!("../../templates/json.tera")),
    ("license", include_str!("../../templates/license.tera")),
    ("markdown", include_str!("../../templates/markdown.tera")),
    ("package_json", include_str!("../../templates/package_json.tera")),
    ("python", include_str!("../../templates/python.tera")),
    ("readme", include_str!("../../templates/readme.tera")),
    ("requirements", include_str!("../../templates/requirements.tera")),
    ("rust", include_str!("../../templates/rust.tera")),
    ("typescript", include_str!("../../templates/typescript.tera")),
    ("yaml", include_str!("../../templates/yaml.tera")),
];

/// Extension that marks a file in an override directory as a template.
const TEMPLATE_EXTENSION: &str = "tera";

pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Creates an engine holding only the embedded templates.
    pub fn new() -> Result<Self, ScaffError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;
        debug!("Registered {} built-in templates", BUILTIN_TEMPLATES.len());
        Ok(Self { tera })
    }

    /// Creates an engine whose built-ins are extended or replaced by the
    /// `*.tera` files found (recursively) under `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Self, ScaffError> {
        let mut engine = Self::new()?;
        if !dir.is_dir() {
            return Err(ScaffError::FileSystem(format!(
                "Template directory '{}' does not exist",
                dir.display()
            )));
        }

        let mut overrides = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ScaffError::FileSystem(format!(
                    "Failed to read template directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
            let path = entry.path();
            let is_template = entry.file_type().is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));
            if !is_template {
                continue;
            }
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let content = std::fs::read_to_string(path).map_err(|e| {
                ScaffError::FileSystem(format!(
                    "Failed to read template '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            debug!("Loaded template override '{}' from {}", name, path.display());
            overrides.push((name, content));
        }

        info!(
            "Loaded {} template override(s) from '{}'",
            overrides.len(),
            dir.display()
        );
        engine.tera.add_raw_templates(overrides)?;
        Ok(engine)
    }

    /// Renders the template registered as `name`.
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String, ScaffError> {
        Ok(self.tera.render(name, context)?)
    }
}
