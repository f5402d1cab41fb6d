//! # ScaffRS Layout Create Command
//!
//! File: cli/src/commands/layout/create.rs
//!
//! ## Overview
//!
//! Implements `scaffrs layout create <SOURCE> <PROJECT_NAME>`: analyzes the
//! layout, then writes it to disk as a new project. Every file in the layout
//! is filled with boilerplate whose amount depends on the complexity tier,
//! and the recommended workflow is written into README.md and CONTRIBUTING.md.
//!
//! ## Workflow
//!
//! 1. Load configuration, read the layout and resolve team size / preferences.
//! 2. Build the structure report and detect the project type.
//! 3. Resolve the target directory (`--output`, `SCAFFRS_OUTPUT_DIR`, or
//!    `[output] directory`) and check for collisions (`--force`).
//! 4. Create every directory and render every file.
//! 5. Add README.md, CONTRIBUTING.md, LICENSE and .gitignore when the layout
//!    lacks them, plus a Dockerfile (`include-docker`) and a CI pipeline
//!    (`include-ci`) on request.
//!
//! ## Examples
//!
//! ```bash
//! scaffrs layout create web-app.json my-app
//! scaffrs layout create web-app.json my-app -o ~/code --prefs "include docker, include ci"
//! scaffrs layout create web-app.json my-app --templates ./my-templates --var author="Jane Doe"
//! ```
//!
use crate::analysis::analyzer::is_ci_config_path;
use crate::analysis::preferences::{Preference, Preferences};
use crate::analysis::report::{build_report, StructureReport};
use crate::analysis::tree::TreeNode;
use crate::commands::layout::utils::boilerplate::{
    ContentGenerator, ProjectContext, TemplateGenerator,
};
use crate::commands::layout::utils::inputs::{load_source_tree, parse_team_size, resolve_hints};
use crate::commands::layout::utils::project_detector::detect_project;
use crate::common::fs::io;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::core::templating::TemplateEngine;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Documents every generated project gets unless the layout has its own.
const STANDARD_DOCUMENTS: &[&str] = &["README.md", "CONTRIBUTING.md", "LICENSE", ".gitignore"];
const DOCKERFILE: &str = "Dockerfile";
const CI_WORKFLOW: &str = ".github/workflows/ci.yml";

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// JSON layout file or existing directory to generate from.
    pub source: PathBuf,

    /// Name of the new project directory; also available to templates.
    pub project_name: String,

    /// Parent directory for the new project (default: `[output] directory`).
    #[arg(long, short = 'o', env = "SCAFFRS_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Generate into an existing directory, overwriting layout files.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Number of people working on the project.
    #[arg(long, value_parser = parse_team_size)]
    pub team_size: Option<u32>,

    /// Preference hints, e.g. "include docker, include ci". Known hints are also
    /// picked out of longer phrases.
    #[arg(long)]
    pub prefs: Option<String>,

    /// Directory of `*.tera` files extending or replacing the built-in templates.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Extra template variable; may be repeated. Overrides built-in variables.
    #[arg(long = "var", value_parser = parse_key_val, action = clap::ArgAction::Append)]
    pub var: Vec<(String, String)>,
}

/// Parses `KEY=VALUE` for `--var`.
fn parse_key_val(s: &str) -> Result<(String, String)> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| {
            anyhow!(
                "Invalid variable format: '{}'. Expected format: KEY=VALUE",
                s
            )
        })
}

/// What a generation run wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub directories_created: usize,
    pub files_written: usize,
    /// Documents added on top of the layout, as paths relative to the project.
    pub documents_added: Vec<String>,
}

pub async fn handle_create(args: CreateArgs) -> Result<()> {
    info!(
        "Creating project '{}' from layout '{}'",
        args.project_name,
        args.source.display()
    );

    let cfg = config::load_config().context("Failed to load ScaffRS configuration")?;
    let root = load_source_tree(&args.source)?;
    let (team_size, preferences) = resolve_hints(&cfg, args.team_size, args.prefs.as_deref());
    let report = build_report(&root, team_size, &preferences, &cfg.scoring)
        .with_context(|| format!("Failed to analyze '{}'", args.source.display()))?;
    let project_info = detect_project(&root, &report.metrics);
    debug!("Detected project: {:?}", project_info);

    let target_path = prepare_target_path(&args, &cfg)
        .context("Failed to prepare the target project directory")?;

    let engine = load_engine(&args, &cfg)?;
    let generator = TemplateGenerator::new(engine);
    let project = ProjectContext::new(
        &args.project_name,
        &root,
        &report,
        project_info,
        args.var.clone(),
    );

    let summary = materialize(&root, &target_path, &generator, &project, &preferences)
        .with_context(|| format!("Failed to generate project in '{}'", target_path.display()))?;

    print_completion_message(&target_path, &args.project_name, &report, &summary);
    Ok(())
}

/// Template engine for this run: `--templates` wins over `[output] templates`.
fn load_engine(args: &CreateArgs, cfg: &Config) -> Result<TemplateEngine> {
    let overrides = args
        .templates
        .clone()
        .or_else(|| cfg.output.templates.as_ref().map(PathBuf::from));
    let engine = match overrides {
        Some(dir) => TemplateEngine::with_overrides(&dir)
            .with_context(|| format!("Failed to load templates from '{}'", dir.display()))?,
        None => TemplateEngine::new().context("Failed to load built-in templates")?,
    };
    Ok(engine)
}

/// Resolves `<output>/<project_name>` and applies the collision rules: an
/// existing file is always an error, an existing directory needs `--force`.
fn prepare_target_path(args: &CreateArgs, cfg: &Config) -> Result<PathBuf> {
    if args.project_name.trim().is_empty()
        || args.project_name.contains(['/', '\\'])
        || args.project_name == "."
        || args.project_name == ".."
    {
        anyhow::bail!("Invalid project name '{}'", args.project_name);
    }

    let base_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.output.directory));
    let base_dir = if base_dir.is_absolute() {
        base_dir
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(base_dir)
    };
    let target_path = base_dir.join(&args.project_name);
    debug!("Resolved target project path: {}", target_path.display());

    if target_path.exists() {
        if !target_path.is_dir() {
            anyhow::bail!(
                "Target path '{}' exists but is a file, cannot create project directory.",
                target_path.display()
            );
        }
        if !args.force {
            anyhow::bail!(
                "Target directory '{}' already exists. Use --force to overwrite or choose a different project name/output directory.",
                target_path.display()
            );
        }
        warn!(
            "Target directory '{}' already exists. Proceeding due to --force flag. Existing files may be overwritten.",
            target_path.display()
        );
    }
    Ok(target_path)
}

/// Writes the layout under `target` and adds the project documents.
pub fn materialize(
    root: &TreeNode,
    target: &Path,
    generator: &dyn ContentGenerator,
    project: &ProjectContext,
    preferences: &Preferences,
) -> Result<GenerationSummary> {
    let mut summary = GenerationSummary::default();
    io::ensure_dir_exists(target)?;

    for (relative, node) in root.walk() {
        if relative.as_os_str().is_empty() {
            continue;
        }
        let destination = target.join(&relative);
        if node.is_dir() {
            io::ensure_dir_exists(&destination)?;
            summary.directories_created += 1;
            continue;
        }
        let content = generator
            .generate(&relative, project)
            .with_context(|| format!("Failed to generate content for '{}'", relative.display()))?;
        io::write_string_to_file(&destination, &content)?;
        summary.files_written += 1;
    }

    for document in extra_documents(root, preferences) {
        let relative = Path::new(document);
        let content = generator
            .generate(relative, project)
            .with_context(|| format!("Failed to generate '{}'", document))?;
        if io::write_if_absent(&target.join(relative), &content)? {
            summary.documents_added.push(document.to_string());
        }
    }

    info!(
        "Generated {} directories and {} files ({} documents added)",
        summary.directories_created,
        summary.files_written,
        summary.documents_added.len()
    );
    Ok(summary)
}

/// Documents to add on top of the layout.
fn extra_documents(root: &TreeNode, preferences: &Preferences) -> Vec<&'static str> {
    let mut documents: Vec<&'static str> = STANDARD_DOCUMENTS
        .iter()
        .copied()
        .filter(|name| !root_has_file(root, name))
        .collect();
    if preferences.contains(Preference::IncludeDocker) && !root_has_file(root, DOCKERFILE) {
        documents.push(DOCKERFILE);
    }
    if preferences.contains(Preference::IncludeCi) && !layout_has_ci(root) {
        documents.push(CI_WORKFLOW);
    }
    documents
}

fn root_has_file(root: &TreeNode, name: &str) -> bool {
    root.children()
        .iter()
        .any(|c| c.is_file() && c.name().eq_ignore_ascii_case(name))
}

/// Whether the layout itself carries CI configuration. `include-ci` marks the
/// metrics flag, so this looks at the tree directly.
fn layout_has_ci(root: &TreeNode) -> bool {
    root.walk().into_iter().any(|(path, node)| {
        node.is_file() && is_ci_config_path(&path.to_string_lossy().replace('\\', "/"))
    })
}

fn print_completion_message(
    target_path: &Path,
    project_name: &str,
    report: &StructureReport,
    summary: &GenerationSummary,
) {
    let primary = report.primary_workflow();
    println!("\n✅ Project '{}' created successfully!", project_name);
    println!("   Location:   {}", target_path.display());
    println!(
        "   Generated:  {} directories, {} files",
        summary.directories_created,
        summary.files_written + summary.documents_added.len()
    );
    if !summary.documents_added.is_empty() {
        println!("   Added:      {}", summary.documents_added.join(", "));
    }
    println!(
        "   Complexity: {:.1} ({})",
        report.complexity.score, report.complexity.tier
    );
    println!(
        "   Workflow:   {} ({:.0}%)",
        primary.kind.display_name(),
        primary.confidence * 100.0
    );

    println!("\nNext steps:");
    let display_path = match env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(target_path, &cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| target_path.display().to_string()),
        Err(_) => target_path.display().to_string(),
    };
    println!("  1. Navigate to your project: cd {}", display_path);
    println!("  2. Start version control: git init && git add . && git commit -m \"Initial commit\"");
    println!("  3. Review the workflow notes: cat CONTRIBUTING.md");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::layout::utils::project_detector::ProjectInfo;
    use crate::core::config::ScoringConfig;
    use crate::core::error::ScaffError;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn web_app() -> TreeNode {
        TreeNode::from_json(
            "web-app",
            &json!({
                "src": { "components": ["Header.jsx"], "index.js": "" },
                "tests": ["app.test.js"],
                "package.json": "",
                "README.md": ""
            }),
        )
        .unwrap()
    }

    fn project_for(root: &TreeNode, preferences: &Preferences) -> ProjectContext {
        let report = build_report(root, None, preferences, &ScoringConfig::default()).unwrap();
        let info = detect_project(root, &report.metrics);
        ProjectContext::new("my-app", root, &report, info, Vec::new())
    }

    fn generator() -> TemplateGenerator {
        TemplateGenerator::new(TemplateEngine::new().unwrap())
    }

    /// Writes the relative path into each file.
    struct PathEcho;

    impl ContentGenerator for PathEcho {
        fn generate(
            &self,
            relative_path: &Path,
            _: &ProjectContext,
        ) -> std::result::Result<String, ScaffError> {
            Ok(relative_path.to_string_lossy().replace('\\', "/"))
        }
    }

    #[test]
    fn test_create_args_parsing() {
        let args = CreateArgs::try_parse_from(["create", "layout.json", "my-project"]).unwrap();
        assert_eq!(args.source, PathBuf::from("layout.json"));
        assert_eq!(args.project_name, "my-project");
        assert!(!args.force);
        assert!(args.var.is_empty());

        let args = CreateArgs::try_parse_from([
            "create",
            "layout.json",
            "awesome-api",
            "--output",
            "/tmp/projects",
            "--force",
            "--team-size",
            "4",
            "--prefs",
            "include docker",
            "--templates",
            "./tpl",
            "--var",
            "author=Jane Doe",
            "--var",
            "version=1.0.0",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("/tmp/projects")));
        assert!(args.force);
        assert_eq!(args.team_size, Some(4));
        assert_eq!(args.templates, Some(PathBuf::from("./tpl")));
        assert!(args
            .var
            .contains(&("author".to_string(), "Jane Doe".to_string())));
        assert!(args
            .var
            .contains(&("version".to_string(), "1.0.0".to_string())));

        assert!(CreateArgs::try_parse_from(["create", "layout.json"]).is_err());
    }

    #[test]
    fn test_parse_key_val_logic() {
        assert_eq!(
            parse_key_val("name=value").unwrap(),
            ("name".to_string(), "value".to_string())
        );
        assert_eq!(
            parse_key_val("  padded_key  =  padded value ").unwrap(),
            ("padded_key".to_string(), "padded value".to_string())
        );
        assert_eq!(
            parse_key_val("url=http://x?a=b").unwrap().1,
            "http://x?a=b"
        );
        assert!(parse_key_val("invalid_no_equals").is_err());
        assert!(parse_key_val("").is_err());
        assert_eq!(parse_key_val("keyonly=").unwrap().1, "");
    }

    #[test]
    fn test_materialize_writes_layout_and_documents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("my-app");
        let root = web_app();
        let prefs = Preferences::default();
        let project = project_for(&root, &prefs);

        let summary = materialize(&root, &target, &PathEcho, &project, &prefs).unwrap();
        assert_eq!(summary.directories_created, 3);
        assert_eq!(summary.files_written, 5);
        assert_eq!(
            summary.documents_added,
            vec!["CONTRIBUTING.md", "LICENSE", ".gitignore"]
        );

        assert_eq!(
            fs::read_to_string(target.join("src/components/Header.jsx")).unwrap(),
            "src/components/Header.jsx"
        );
        assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "README.md");
        assert!(target.join("tests/app.test.js").is_file());
        assert!(!target.join(DOCKERFILE).exists());
    }

    #[test]
    fn test_materialize_with_templates() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("my-app");
        let root = web_app();
        let prefs = Preferences::parse("include docker, include ci");
        let project = project_for(&root, &prefs);

        let summary = materialize(&root, &target, &generator(), &project, &prefs).unwrap();
        assert!(summary.documents_added.contains(&DOCKERFILE.to_string()));
        assert!(summary.documents_added.contains(&CI_WORKFLOW.to_string()));

        let license = fs::read_to_string(target.join("LICENSE")).unwrap();
        assert!(license.starts_with("MIT License"));
        let contributing = fs::read_to_string(target.join("CONTRIBUTING.md")).unwrap();
        assert!(contributing.contains(project.workflow.name));
        assert!(target.join(".github/workflows/ci.yml").is_file());
    }

    #[test]
    fn test_existing_ci_is_not_duplicated() {
        let root = TreeNode::from_json(
            "svc",
            &json!({ ".gitlab-ci.yml": "", "Dockerfile": "", "main.go": "" }),
        )
        .unwrap();
        let prefs = Preferences::parse("include ci, include docker");
        let documents = extra_documents(&root, &prefs);
        assert!(!documents.contains(&CI_WORKFLOW));
        assert!(!documents.contains(&DOCKERFILE));
        assert!(documents.contains(&"README.md"));
    }

    #[test]
    fn test_documents_never_overwrite_existing_files() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("keep");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("LICENSE"), "custom").unwrap();

        let root = TreeNode::from_json("keep", &json!({ "main.py": "" })).unwrap();
        let prefs = Preferences::default();
        let project = ProjectContext::new(
            "keep",
            &root,
            &build_report(&root, None, &prefs, &ScoringConfig::default()).unwrap(),
            ProjectInfo::default(),
            Vec::new(),
        );
        let summary = materialize(&root, &target, &PathEcho, &project, &prefs).unwrap();
        assert!(!summary.documents_added.contains(&"LICENSE".to_string()));
        assert_eq!(fs::read_to_string(target.join("LICENSE")).unwrap(), "custom");
    }

    #[test]
    fn test_prepare_target_path_collisions() {
        let dir = tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.output.directory = dir.path().to_string_lossy().into_owned();

        let mut args = CreateArgs::try_parse_from(["create", "l.json", "fresh"]).unwrap();
        args.output = None;
        assert_eq!(
            prepare_target_path(&args, &cfg).unwrap(),
            dir.path().join("fresh")
        );

        fs::create_dir(dir.path().join("fresh")).unwrap();
        let err = prepare_target_path(&args, &cfg).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        args.force = true;
        assert!(prepare_target_path(&args, &cfg).is_ok());

        fs::write(dir.path().join("taken"), "").unwrap();
        args.project_name = "taken".into();
        let err = prepare_target_path(&args, &cfg).unwrap_err();
        assert!(err.to_string().contains("is a file"));

        args.project_name = "../escape".into();
        assert!(prepare_target_path(&args, &cfg).is_err());
    }
}
