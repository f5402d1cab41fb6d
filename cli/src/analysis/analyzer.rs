//! # ScaffRS Tree Analyzer
//!
//! File: cli/src/analysis/analyzer.rs
//!
//! ## Overview
//!
//! Walks a `TreeNode` once and condenses it into a `Metrics` snapshot: depth,
//! size, branching, the extension histogram and the presence of conventional
//! folders (tests, docs) and CI configuration. The classifier and the scorer
//! both work only from this snapshot.
//!
//! ## Conventions
//!
//! - Depth counts directory nesting. The root is depth 0, `src/` is depth 1,
//!   `src/components/` is depth 2. A file sits at its parent directory's level.
//! - `total_directories` excludes the root itself.
//! - `average_branching_factor` averages the child count of every directory
//!   that has at least one child, the root included.
//! - Extensions are lower-cased and keep the leading dot (`.tsx`); files
//!   without an extension, including dotfiles such as `.gitignore`, are counted
//!   under `""`.
//!
//! Every quantity is a sum, a maximum or an "any" over the tree, so sibling
//! order never changes the result.
//!
use crate::analysis::preferences::{Preference, Preferences};
use crate::analysis::tree::TreeNode;
use crate::core::error::ScaffError;
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Trees nested deeper than this are rejected as malformed.
pub const MAX_NESTING: usize = 256;

pub const TEST_DIR_NAMES: &[&str] = &["test", "tests", "spec", "specs", "__tests__"];
pub const DOC_DIR_NAMES: &[&str] = &["docs", "doc", "documentation"];
const SOURCE_DIR_NAMES: &[&str] = &["src", "lib", "app", "source", "pkg", "cmd"];
const WORKSPACE_DIR_NAMES: &[&str] = &[
    "apps", "packages", "services", "libs", "crates", "modules", "projects",
];
/// Top-level folders that support a project rather than form a product area.
const SUPPORT_DIR_NAMES: &[&str] = &[
    "config", "configs", "scripts", "tools", "build", "dist", "assets", "static", "public",
    "ci", "bin", "vendor", "node_modules", "examples",
];
pub const MANIFEST_FILES: &[&str] = &[
    "cargo.toml",
    "package.json",
    "go.mod",
    "pyproject.toml",
    "requirements.txt",
    "setup.py",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "cmakelists.txt",
    "composer.json",
    "gemfile",
];

/// Relative-path patterns that identify CI configuration.
const CI_PATTERNS: &[&str] = &[
    "**/.github/workflows/*.yml",
    "**/.github/workflows/*.yaml",
    "**/.gitlab-ci.yml",
    "**/Jenkinsfile",
    "**/.travis.yml",
    "**/.circleci/config.yml",
    "**/azure-pipelines.yml",
    "**/bitbucket-pipelines.yml",
];

const CI_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Structural snapshot of one layout tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub max_depth: usize,
    pub total_files: usize,
    pub total_directories: usize,
    pub extension_counts: BTreeMap<String, usize>,
    pub has_tests_folder: bool,
    pub has_docs_folder: bool,
    pub has_ci_config: bool,
    pub average_branching_factor: f64,
    /// Directories directly under the root.
    pub top_level_directories: usize,
    /// Top-level directories that are neither hidden nor support folders.
    pub top_level_areas: usize,
    /// Top-level `apps/`, `packages/`, `services/` and similar containers.
    pub workspace_directories: usize,
    /// Top-level directories that look like a complete project of their own.
    pub project_skeletons: usize,
    pub has_root_manifest: bool,
    pub has_license: bool,
    pub has_contributing_guide: bool,
}

#[derive(Default)]
struct Accumulator {
    metrics: Metrics,
    branching_directories: usize,
    branching_children: usize,
}

/// Computes `Metrics` for `root`.
///
/// The `include-tests`, `include-docs` and `include-ci` hints mark the matching
/// flag as present, since the generator will add that folder or pipeline.
///
/// Fails with `InvalidTree` when the tree nests deeper than `MAX_NESTING`.
pub fn analyze(root: &TreeNode, hints: &Preferences) -> Result<Metrics, ScaffError> {
    if !root.is_dir() {
        return Err(ScaffError::InvalidTree(format!(
            "root '{}' must be a directory",
            root.name()
        )));
    }

    let mut acc = Accumulator::default();
    let mut path = Vec::new();
    visit(root, 0, &mut path, &mut acc)?;

    let mut metrics = acc.metrics;
    if acc.branching_directories > 0 {
        metrics.average_branching_factor =
            acc.branching_children as f64 / acc.branching_directories as f64;
    }
    summarize_top_level(root, &mut metrics);

    metrics.has_tests_folder |= hints.contains(Preference::IncludeTests);
    metrics.has_docs_folder |= hints.contains(Preference::IncludeDocs);
    metrics.has_ci_config |= hints.contains(Preference::IncludeCi);

    debug!(
        "Analyzed '{}': depth={}, files={}, dirs={}, ci={}",
        root.name(),
        metrics.max_depth,
        metrics.total_files,
        metrics.total_directories,
        metrics.has_ci_config
    );
    Ok(metrics)
}

/// `path` holds the names of the directories between the root and `node`.
fn visit<'a>(
    node: &'a TreeNode,
    depth: usize,
    path: &mut Vec<&'a str>,
    acc: &mut Accumulator,
) -> Result<(), ScaffError> {
    if depth > MAX_NESTING {
        return Err(ScaffError::InvalidTree(format!(
            "tree nests deeper than {} levels at '{}'",
            MAX_NESTING,
            path.join("/")
        )));
    }

    if node.is_file() {
        let metrics = &mut acc.metrics;
        metrics.total_files += 1;
        *metrics
            .extension_counts
            .entry(extension_key(node.name()))
            .or_insert(0) += 1;
        if !metrics.has_ci_config {
            let mut relative = path.join("/");
            if !relative.is_empty() {
                relative.push('/');
            }
            relative.push_str(node.name());
            metrics.has_ci_config = is_ci_config_path(&relative);
        }
        return Ok(());
    }

    let metrics = &mut acc.metrics;
    metrics.max_depth = metrics.max_depth.max(depth);
    if depth > 0 {
        metrics.total_directories += 1;
        metrics.has_tests_folder |= is_tests_dir(node.name());
        metrics.has_docs_folder |= is_docs_dir(node.name());
    }
    if !node.children().is_empty() {
        acc.branching_directories += 1;
        acc.branching_children += node.children().len();
    }

    if depth > 0 {
        path.push(node.name());
    }
    for child in node.children() {
        visit(child, depth + 1, path, acc)?;
    }
    if depth > 0 {
        path.pop();
    }
    Ok(())
}

fn summarize_top_level(root: &TreeNode, metrics: &mut Metrics) {
    for child in root.children() {
        let name = child.name().to_lowercase();
        if child.is_file() {
            metrics.has_root_manifest |= MANIFEST_FILES.contains(&name.as_str());
            metrics.has_license |= ["license", "licence", "copying"]
                .iter()
                .any(|prefix| name.starts_with(prefix));
            metrics.has_contributing_guide |= name.starts_with("contributing");
            continue;
        }

        metrics.top_level_directories += 1;
        if WORKSPACE_DIR_NAMES.contains(&name.as_str()) {
            metrics.workspace_directories += 1;
        }
        let is_support = name.starts_with('.')
            || is_tests_dir(&name)
            || is_docs_dir(&name)
            || SUPPORT_DIR_NAMES.contains(&name.as_str());
        if !is_support {
            metrics.top_level_areas += 1;
        }
        if looks_like_project(child) {
            metrics.project_skeletons += 1;
        }
    }
}

/// A source folder plus a tests/docs folder or a build manifest.
fn looks_like_project(dir: &TreeNode) -> bool {
    let mut has_source = false;
    let mut has_support = false;
    for entry in dir.children() {
        let name = entry.name().to_lowercase();
        if entry.is_dir() {
            has_source |= SOURCE_DIR_NAMES.contains(&name.as_str());
            has_support |= is_tests_dir(&name) || is_docs_dir(&name);
        } else {
            has_support |= MANIFEST_FILES.contains(&name.as_str());
        }
    }
    has_source && has_support
}

pub fn is_tests_dir(name: &str) -> bool {
    let name = name.to_lowercase();
    TEST_DIR_NAMES.contains(&name.as_str())
}

pub fn is_docs_dir(name: &str) -> bool {
    let name = name.to_lowercase();
    DOC_DIR_NAMES.contains(&name.as_str())
}

/// Whether a `/`-separated path relative to the project root is a CI config file.
pub fn is_ci_config_path(relative: &str) -> bool {
    static PATTERNS: OnceLock<Vec<Pattern>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            CI_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect()
        })
        .iter()
        .any(|pattern| pattern.matches_with(relative, CI_MATCH_OPTIONS))
}

/// Lower-cased extension with its leading dot, or `""` when there is none.
pub fn extension_key(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> TreeNode {
        TreeNode::from_json("project", &value).unwrap()
    }

    fn no_hints() -> Preferences {
        Preferences::default()
    }

    fn web_app() -> TreeNode {
        tree(json!({
            "src": {
                "components": ["Header.jsx", "Footer.jsx"],
                "pages": ["Home.jsx", "About.jsx"],
                "utils": ["api.js", "helpers.js"]
            },
            "tests": ["App.test.js"],
            "docs": ["setup.md"],
            "package.json": "",
            "README.md": ""
        }))
    }

    #[test]
    fn test_root_only_tree_has_depth_zero() {
        let root = TreeNode::directory("empty", vec![]).unwrap();
        let metrics = analyze(&root, &no_hints()).unwrap();
        assert_eq!(metrics.max_depth, 0);
        assert_eq!(metrics.total_files, 0);
        assert_eq!(metrics.total_directories, 0);
        assert_eq!(metrics.average_branching_factor, 0.0);
        assert!(metrics.extension_counts.is_empty());
    }

    #[test]
    fn test_web_app_example() {
        let metrics = analyze(&web_app(), &no_hints()).unwrap();
        assert_eq!(metrics.max_depth, 2);
        assert_eq!(metrics.total_files, 10);
        assert_eq!(metrics.total_directories, 6);
        assert!(metrics.has_tests_folder);
        assert!(metrics.has_docs_folder);
        assert!(!metrics.has_ci_config);
        assert!(metrics.has_root_manifest);
        assert_eq!(metrics.extension_counts.get(".jsx"), Some(&4));
        assert_eq!(metrics.extension_counts.get(".js"), Some(&3));
        assert_eq!(metrics.extension_counts.get(".md"), Some(&2));
        // root 5, src 3, components/pages/utils 2 each, tests 1, docs 1
        assert!((metrics.average_branching_factor - 16.0 / 7.0).abs() < 1e-12);
        assert_eq!(metrics.top_level_directories, 3);
        assert_eq!(metrics.top_level_areas, 1);
    }

    #[test]
    fn test_tests_folder_and_github_workflow() {
        let root = tree(json!({
            "tests": ["test_app.py"],
            ".github": { "workflows": ["ci.yml"] },
            "app.py": ""
        }));
        let metrics = analyze(&root, &no_hints()).unwrap();
        assert!(metrics.has_tests_folder);
        assert!(metrics.has_ci_config);
    }

    #[test]
    fn test_ci_patterns_match_by_path_not_depth() {
        assert!(is_ci_config_path(".gitlab-ci.yml"));
        assert!(is_ci_config_path("Jenkinsfile"));
        assert!(is_ci_config_path("services/api/Jenkinsfile"));
        assert!(is_ci_config_path(".github/workflows/release.YAML"));
        assert!(is_ci_config_path("apps/web/.github/workflows/ci.yml"));
        assert!(is_ci_config_path(".circleci/config.yml"));
        assert!(!is_ci_config_path("workflows/ci.yml"));
        assert!(!is_ci_config_path(".github/ci.yml"));
        assert!(!is_ci_config_path(".github/workflows/nested/ci.yml"));
        assert!(!is_ci_config_path("config.yml"));
    }

    #[test]
    fn test_folder_synonyms_case_insensitive() {
        let root = tree(json!({ "__TESTS__": ["a.js"], "Documentation": ["index.md"] }));
        let metrics = analyze(&root, &no_hints()).unwrap();
        assert!(metrics.has_tests_folder);
        assert!(metrics.has_docs_folder);

        let root = tree(json!({ "testing": ["a.js"], "mydocs": ["index.md"] }));
        let metrics = analyze(&root, &no_hints()).unwrap();
        assert!(!metrics.has_tests_folder);
        assert!(!metrics.has_docs_folder);
    }

    #[test]
    fn test_extension_keys() {
        assert_eq!(extension_key("Main.RS"), ".rs");
        assert_eq!(extension_key("archive.tar.gz"), ".gz");
        assert_eq!(extension_key("Makefile"), "");
        assert_eq!(extension_key(".gitignore"), "");
    }

    #[test]
    fn test_empty_directories_excluded_from_branching() {
        let root = tree(json!({ "a": {}, "b": {}, "c": ["x.txt", "y.txt"] }));
        let metrics = analyze(&root, &no_hints()).unwrap();
        // root has 3 children, c has 2; a and b are empty and excluded.
        assert_eq!(metrics.average_branching_factor, 2.5);
        assert_eq!(metrics.max_depth, 1);
        assert_eq!(metrics.total_directories, 3);
    }

    #[test]
    fn test_order_independence() {
        let forward = tree(json!({
            "src": { "a.rs": "", "b.rs": "", "nested": ["c.rs"] },
            "docs": ["index.md"],
            "Jenkinsfile": ""
        }));
        let reversed = TreeNode::directory(
            "project",
            forward.children().iter().rev().map(reverse_children).collect(),
        )
        .unwrap();
        assert_eq!(
            analyze(&forward, &no_hints()).unwrap(),
            analyze(&reversed, &no_hints()).unwrap()
        );
    }

    fn reverse_children(node: &TreeNode) -> TreeNode {
        if node.is_file() {
            return node.clone();
        }
        TreeNode::directory(
            node.name(),
            node.children().iter().rev().map(reverse_children).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_hints_mark_planned_folders() {
        let root = tree(json!({ "main.py": "" }));
        let hints = Preferences::parse("include tests, include docs, include ci");
        let metrics = analyze(&root, &hints).unwrap();
        assert!(metrics.has_tests_folder);
        assert!(metrics.has_docs_folder);
        assert!(metrics.has_ci_config);
    }

    #[test]
    fn test_top_level_summary() {
        let root = tree(json!({
            "frontend": { "src": ["main.ts"], "tests": ["main.test.ts"] },
            "backend": { "src": ["main.go"], "go.mod": "" },
            "apps": { "web": ["index.html"] },
            "scripts": ["deploy.sh"],
            ".github": { "workflows": ["ci.yml"] },
            "LICENSE": "",
            "CONTRIBUTING.md": ""
        }));
        let metrics = analyze(&root, &no_hints()).unwrap();
        assert_eq!(metrics.top_level_directories, 5);
        assert_eq!(metrics.top_level_areas, 3); // frontend, backend, apps
        assert_eq!(metrics.workspace_directories, 1);
        assert_eq!(metrics.project_skeletons, 2);
        assert!(!metrics.has_root_manifest);
        assert!(metrics.has_license);
        assert!(metrics.has_contributing_guide);
    }

    #[test]
    fn test_excessive_nesting_rejected() {
        let mut node = TreeNode::file("deep.txt").unwrap();
        for i in 0..=MAX_NESTING {
            node = TreeNode::directory(format!("d{}", i), vec![node]).unwrap();
        }
        let root = TreeNode::directory("root", vec![node]).unwrap();
        let err = analyze(&root, &no_hints()).unwrap_err();
        assert!(matches!(err, ScaffError::InvalidTree(_)));
    }

    #[test]
    fn test_file_root_rejected() {
        let root = TreeNode::file("lonely.txt").unwrap();
        assert!(analyze(&root, &no_hints()).is_err());
    }
}
