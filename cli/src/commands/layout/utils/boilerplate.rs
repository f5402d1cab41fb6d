//! # ScaffRS Boilerplate Generation
//!
//! File: cli/src/commands/layout/utils/boilerplate.rs
//!
//! ## Overview
//!
//! Produces the starting content of every file `layout create` writes. The
//! analysis report drives two things here:
//! - the complexity tier picks a `DetailLevel`, which controls how much code
//!   each template emits;
//! - the primary workflow and its runners-up feed README.md and CONTRIBUTING.md.
//!
//! ## Architecture
//!
//! - `ContentGenerator`: the seam for anything that can fill a file. The
//!   command only talks to this trait.
//! - `TemplateGenerator`: the built-in implementation. It maps a file name to
//!   one of the embedded Tera templates and renders it with a context built
//!   from `ProjectContext`.
//! - Casing helpers turn project and file names into identifiers.
//!
use crate::analysis::complexity::Tier;
use crate::analysis::report::StructureReport;
use crate::analysis::tree::TreeNode;
use crate::analysis::workflow::{WorkflowKind, WorkflowRecommendation};
use crate::commands::layout::utils::project_detector::ProjectInfo;
use crate::commands::layout::utils::tree_printer::{render_tree, TreeStyle};
use crate::core::error::ScaffError;
use crate::core::templating::TemplateEngine;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// How much boilerplate a template emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailLevel {
    Minimal = 1,
    Standard = 2,
    Extended = 3,
}

impl DetailLevel {
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Simple => DetailLevel::Minimal,
            Tier::Moderate => DetailLevel::Standard,
            Tier::Complex | Tier::Enterprise => DetailLevel::Extended,
        }
    }

    pub fn as_number(self) -> u8 {
        self as u8
    }
}

/// A workflow as the README and CONTRIBUTING templates see it.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
    pub rationale: Vec<String>,
    pub confidence_pct: u32,
}

impl From<&WorkflowRecommendation> for WorkflowSummary {
    fn from(rec: &WorkflowRecommendation) -> Self {
        WorkflowSummary {
            key: rec.kind.key(),
            name: rec.kind.display_name(),
            description: rec.kind.description(),
            steps: rec.kind.branching_steps(),
            rationale: rec.rationale.clone(),
            confidence_pct: (rec.confidence * 100.0).round() as u32,
        }
    }
}

/// Project-wide facts shared by every generated file.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_name: String,
    pub detail: DetailLevel,
    pub tier: Tier,
    pub info: ProjectInfo,
    pub workflow: WorkflowSummary,
    pub primary_kind: WorkflowKind,
    pub runners_up: Vec<WorkflowSummary>,
    /// Plain-text rendering of the layout for the README.
    pub structure: String,
    pub has_tests: bool,
    pub has_docs: bool,
    pub has_ci: bool,
    pub current_date: String,
    pub current_year: String,
    /// `--var KEY=VALUE` pairs; applied last so they override everything.
    pub vars: Vec<(String, String)>,
}

impl ProjectContext {
    pub fn new(
        project_name: &str,
        root: &TreeNode,
        report: &StructureReport,
        info: ProjectInfo,
        vars: Vec<(String, String)>,
    ) -> Self {
        let primary = report.primary_workflow();
        let now = chrono::Local::now();
        let structure = render_tree(root, TreeStyle::Plain)
            .replacen(&format!("{}/", root.name()), &format!("{}/", project_name), 1);
        ProjectContext {
            project_name: project_name.to_string(),
            detail: DetailLevel::for_tier(report.complexity.tier),
            tier: report.complexity.tier,
            info,
            workflow: WorkflowSummary::from(primary),
            primary_kind: primary.kind,
            runners_up: report.runners_up().iter().map(WorkflowSummary::from).collect(),
            structure: structure.trim_end().to_string(),
            has_tests: report.metrics.has_tests_folder,
            has_docs: report.metrics.has_docs_folder,
            has_ci: report.metrics.has_ci_config,
            current_date: now.format("%Y-%m-%d").to_string(),
            current_year: now.format("%Y").to_string(),
            vars,
        }
    }

    /// Branches the generated CI pipeline runs on.
    fn ci_branches(&self) -> Vec<&'static str> {
        match self.primary_kind {
            WorkflowKind::Gitflow => vec!["main", "develop"],
            _ => vec!["main"],
        }
    }

    /// Variables available to every template.
    fn base_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        let name = &self.project_name;
        context.insert("project_name", name);
        context.insert("project_snake", &to_snake_case(name));
        context.insert("project_camel", &to_camel_case(name));
        context.insert("project_pascal", &to_pascal_case(name));
        context.insert("project_kebab", &to_kebab_case(name));
        context.insert("detail", &self.detail.as_number());
        context.insert("tier", &self.tier.to_string());
        context.insert("language", &self.primary_language());
        context.insert("languages", &self.info.languages);
        context.insert("build_system", self.info.toolchain.key());
        context.insert("technologies", &self.info.technologies);
        context.insert("workflow", &self.workflow);
        context.insert("runners_up", &self.runners_up);
        context.insert("structure", &self.structure);
        context.insert("has_tests", &self.has_tests);
        context.insert("has_docs", &self.has_docs);
        context.insert("has_ci", &self.has_ci);
        context.insert("ci_branches", &self.ci_branches());
        context.insert("current_date", &self.current_date);
        context.insert("year", &self.current_year);
        context
    }

    fn primary_language(&self) -> String {
        match self.info.project_type.as_str() {
            "Unknown" => self.info.languages.first().cloned().unwrap_or_default(),
            other => other.to_string(),
        }
    }
}

/// Fills one file of a generated project.
pub trait ContentGenerator {
    /// Returns the content for the file at `relative_path` (relative to the
    /// project root, using the layout's own names).
    fn generate(&self, relative_path: &Path, project: &ProjectContext) -> Result<String, ScaffError>;
}

/// Renders embedded (or overridden) Tera templates.
pub struct TemplateGenerator {
    engine: TemplateEngine,
}

impl TemplateGenerator {
    pub fn new(engine: TemplateEngine) -> Self {
        Self { engine }
    }
}

impl ContentGenerator for TemplateGenerator {
    fn generate(&self, relative_path: &Path, project: &ProjectContext) -> Result<String, ScaffError> {
        let file_name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(template) = template_for(relative_path) else {
            debug!("No template for binary-looking file '{}'", relative_path.display());
            return Ok(String::new());
        };

        let mut context = project.base_context();
        let stem = Path::new(&file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        let parent = relative_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        let ext = extension_of(&file_name);

        context.insert("file_name", &file_name);
        context.insert("file_stem", &stem);
        context.insert("relative_path", &relative_path.to_string_lossy().replace('\\', "/"));
        context.insert("stem_snake", &to_snake_case(&stem));
        context.insert("stem_camel", &to_camel_case(&stem));
        context.insert("stem_pascal", &to_pascal_case(&stem));
        context.insert("stem_title", &to_title_case(&stem));
        context.insert("is_component", &is_component(&ext, &stem, parent.as_deref()));
        context.insert("package_name", &go_package_name(&stem, parent.as_deref(), project));
        context.insert("comment_prefix", comment_prefix(&ext));

        for (key, value) in &project.vars {
            context.insert(key.as_str(), value);
        }

        debug!("Rendering '{}' with template '{}'", relative_path.display(), template);
        self.engine.render(template, &context)
    }
}

/// Picks the template for a file, or `None` for assets that should stay empty.
pub fn template_for(relative_path: &Path) -> Option<&'static str> {
    let file_name = relative_path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let in_workflows = relative_path
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/").to_lowercase())
        .is_some_and(|p| p == ".github/workflows" || p.ends_with("/.github/workflows"));

    let by_name = match file_name.as_str() {
        "readme.md" => Some("readme"),
        "contributing.md" => Some("contributing"),
        "license" | "license.md" | "license.txt" => Some("license"),
        "requirements.txt" => Some("requirements"),
        "package.json" => Some("package_json"),
        ".gitignore" => Some("gitignore"),
        _ if file_name.contains("dockerfile") => Some("dockerfile"),
        _ => None,
    };
    if by_name.is_some() {
        return by_name;
    }

    let ext = extension_of(&file_name);
    let template = match ext.as_str() {
        ".yml" | ".yaml" if in_workflows => "github_workflow",
        ".py" => "python",
        ".js" | ".jsx" | ".mjs" | ".cjs" => "javascript",
        ".ts" | ".tsx" => "typescript",
        ".rs" => "rust",
        ".go" => "go",
        ".html" | ".htm" => "html",
        ".css" | ".scss" => "css",
        ".md" => "markdown",
        ".json" => "json",
        ".yml" | ".yaml" => "yaml",
        ".png" | ".jpg" | ".jpeg" | ".gif" | ".ico" | ".svg" | ".webp" | ".woff" | ".woff2"
        | ".ttf" | ".pdf" | ".zip" => return None,
        _ => "generic",
    };
    Some(template)
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn comment_prefix(ext: &str) -> &'static str {
    match ext {
        ".java" | ".c" | ".h" | ".cpp" | ".hpp" | ".cc" | ".cs" | ".kt" | ".kts" | ".swift"
        | ".php" | ".scala" | ".dart" => "//",
        ".sql" | ".lua" | ".hs" => "--",
        ".bat" | ".cmd" => "REM",
        _ => "#",
    }
}

fn is_component(ext: &str, stem: &str, parent: Option<&str>) -> bool {
    if matches!(ext, ".jsx" | ".tsx") {
        return true;
    }
    let capitalized = stem.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    capitalized && matches!(parent, Some("components" | "pages" | "views"))
}

fn go_package_name(stem: &str, parent: Option<&str>, project: &ProjectContext) -> String {
    if stem == "main" {
        return "main".to_string();
    }
    let base = parent.unwrap_or(&project.project_name);
    to_snake_case(base).replace('_', "")
}

// --- Case Conversion Helpers ---

fn is_delimiter(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | ' ')
}

/// Replaces word delimiters with underscores and lower-cases.
pub fn to_snake_case(input: &str) -> String {
    input
        .chars()
        .map(|c| if is_delimiter(c) { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

pub fn to_kebab_case(input: &str) -> String {
    to_snake_case(input).replace('_', "-")
}

/// Lower-cases the first character and capitalizes each following word.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = false;
    let mut first_word_char = true;

    for c in input.chars() {
        if is_delimiter(c) {
            capitalize_next = !first_word_char;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else if first_word_char {
            result.push(c.to_ascii_lowercase());
            first_word_char = false;
        } else {
            result.push(c);
        }
    }
    result
}

pub fn to_pascal_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = true;

    for c in input.chars() {
        if is_delimiter(c) {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// `getting-started` -> `Getting Started`.
pub fn to_title_case(input: &str) -> String {
    input
        .split(is_delimiter)
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
