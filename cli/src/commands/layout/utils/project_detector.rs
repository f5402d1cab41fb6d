//! # ScaffRS Project Detector
//!
//! File: cli/src/commands/layout/utils/project_detector.rs
//!
//! ## Overview
//!
//! Works out what kind of project a layout describes so the generator can pick
//! matching templates (Dockerfile base image, CI steps, `.gitignore` rules).
//!
//! Detection order:
//! 1. Marker files at the root (`Cargo.toml`, `go.mod`, `package.json`, ...)
//! 2. The language with the most files in the extension histogram
//! 3. `Unknown`
//!
//! The detector also lists every language present and a few technology
//! indicators found anywhere in the tree (Docker, Compose, Kubernetes, CI).
//!
use crate::analysis::analyzer::{is_ci_config_path, Metrics};
use crate::analysis::tree::TreeNode;
use std::collections::BTreeMap;
use tracing::debug;

/// Build tooling a project uses; selects template branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
    Cargo,
    GoModules,
    Npm,
    Pip,
    Maven,
    Gradle,
    CMake,
    Composer,
    Bundler,
    Unknown,
}

impl Toolchain {
    /// Short key used inside templates.
    pub fn key(self) -> &'static str {
        match self {
            Toolchain::Cargo => "cargo",
            Toolchain::GoModules => "go",
            Toolchain::Npm => "npm",
            Toolchain::Pip => "pip",
            Toolchain::Maven => "maven",
            Toolchain::Gradle => "gradle",
            Toolchain::CMake => "cmake",
            Toolchain::Composer => "composer",
            Toolchain::Bundler => "bundler",
            Toolchain::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub project_type: String,
    pub build_system: String,
    pub toolchain: Toolchain,
    /// Languages by file count, most common first.
    pub languages: Vec<String>,
    pub technologies: Vec<String>,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        ProjectInfo {
            project_type: "Unknown".to_string(),
            build_system: "Unknown".to_string(),
            toolchain: Toolchain::Unknown,
            languages: Vec::new(),
            technologies: Vec::new(),
        }
    }
}

/// Detects the project type of the layout rooted at `root`.
pub fn detect_project(root: &TreeNode, metrics: &Metrics) -> ProjectInfo {
    let languages = languages_by_count(metrics);
    let technologies = detect_technologies(root);

    let (project_type, build_system, toolchain) = match detect_from_markers(root, metrics) {
        Some(found) => found,
        None => match languages.first() {
            Some(language) => {
                debug!("Detected '{}' from file extensions", language);
                (
                    language.clone(),
                    "Unknown (by extension)".to_string(),
                    toolchain_for_language(language),
                )
            }
            None => {
                debug!("Could not determine project type");
                let info = ProjectInfo::default();
                (info.project_type, info.build_system, info.toolchain)
            }
        },
    };

    ProjectInfo {
        project_type,
        build_system,
        toolchain,
        languages,
        technologies,
    }
}

fn root_has(root: &TreeNode, file_name: &str) -> bool {
    root.children()
        .iter()
        .any(|c| c.is_file() && c.name().eq_ignore_ascii_case(file_name))
}

fn has_extension(metrics: &Metrics, extensions: &[&str]) -> bool {
    extensions
        .iter()
        .any(|ext| metrics.extension_counts.contains_key(*ext))
}

fn detect_from_markers(root: &TreeNode, metrics: &Metrics) -> Option<(String, String, Toolchain)> {
    let found = |project: &str, build: &str, toolchain| {
        Some((project.to_string(), build.to_string(), toolchain))
    };

    if root_has(root, "Cargo.toml") {
        return found("Rust", "Cargo", Toolchain::Cargo);
    }
    if root_has(root, "go.mod") {
        return found("Go", "Go Modules", Toolchain::GoModules);
    }
    if root_has(root, "package.json") {
        let project = if has_extension(metrics, &[".jsx", ".tsx", ".vue", ".svelte"]) {
            "Frontend JavaScript/TypeScript"
        } else if has_extension(metrics, &[".ts"]) {
            "TypeScript"
        } else {
            "Node.js"
        };
        return found(project, "npm/yarn", Toolchain::Npm);
    }
    if root_has(root, "CMakeLists.txt") {
        return found("C/C++", "CMake", Toolchain::CMake);
    }
    if root_has(root, "pom.xml") {
        return found("Java", "Maven", Toolchain::Maven);
    }
    if root_has(root, "build.gradle") || root_has(root, "build.gradle.kts") {
        return found("Java/Kotlin", "Gradle", Toolchain::Gradle);
    }
    let has_pyproject = root_has(root, "pyproject.toml");
    let has_setup = root_has(root, "setup.py") || root_has(root, "setup.cfg");
    if has_pyproject || has_setup || root_has(root, "requirements.txt") {
        let build = if has_pyproject {
            "pyproject/pip"
        } else if has_setup {
            "setuptools/pip"
        } else {
            "pip"
        };
        return found("Python", build, Toolchain::Pip);
    }
    if root_has(root, "composer.json") {
        return found("PHP", "Composer", Toolchain::Composer);
    }
    if root_has(root, "Gemfile") {
        return found("Ruby", "Bundler", Toolchain::Bundler);
    }
    None
}

/// Maps a lower-cased extension (with dot) to a language name.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let language = match ext {
        ".rs" => "Rust",
        ".go" => "Go",
        ".py" => "Python",
        ".js" | ".mjs" | ".cjs" | ".jsx" => "JavaScript",
        ".ts" | ".tsx" => "TypeScript",
        ".java" => "Java",
        ".kt" | ".kts" => "Kotlin",
        ".c" | ".h" => "C",
        ".cpp" | ".hpp" | ".cc" | ".cxx" | ".hxx" => "C++",
        ".cs" => "C#",
        ".rb" => "Ruby",
        ".php" => "PHP",
        ".swift" => "Swift",
        ".html" | ".htm" => "HTML",
        ".css" | ".scss" | ".sass" => "CSS",
        ".sh" | ".bash" => "Shell",
        _ => return None,
    };
    Some(language)
}

fn toolchain_for_language(language: &str) -> Toolchain {
    match language {
        "Rust" => Toolchain::Cargo,
        "Go" => Toolchain::GoModules,
        "Python" => Toolchain::Pip,
        "JavaScript" | "TypeScript" => Toolchain::Npm,
        "Ruby" => Toolchain::Bundler,
        "PHP" => Toolchain::Composer,
        _ => Toolchain::Unknown,
    }
}

/// Languages present, most files first; equal counts sort by name.
fn languages_by_count(metrics: &Metrics) -> Vec<String> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (ext, count) in &metrics.extension_counts {
        if let Some(language) = language_for_extension(ext) {
            *counts.entry(language).or_insert(0) += count;
        }
    }
    let mut ranked: Vec<(&'static str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().map(|(l, _)| l.to_string()).collect()
}

fn detect_technologies(root: &TreeNode) -> Vec<String> {
    let mut found: Vec<&'static str> = Vec::new();
    let mut add = |tech: &'static str| {
        if !found.contains(&tech) {
            found.push(tech);
        }
    };

    for (path, node) in root.walk() {
        let name = node.name().to_lowercase();
        if node.is_dir() {
            if matches!(name.as_str(), "k8s" | "kubernetes" | "helm") {
                add("Kubernetes");
            }
            continue;
        }
        if name == "dockerfile" || name.ends_with(".dockerfile") {
            add("Docker");
        }
        if matches!(
            name.as_str(),
            "docker-compose.yml" | "docker-compose.yaml" | "compose.yml" | "compose.yaml"
        ) {
            add("Docker Compose");
        }
        if name == "chart.yaml" {
            add("Kubernetes");
        }
        if name == "makefile" {
            add("Make");
        }
        let relative = path.to_string_lossy().replace('\\', "/");
        if is_ci_config_path(&relative) {
            add("CI");
        }
    }
    found.into_iter().map(str::to_string).collect()
}
