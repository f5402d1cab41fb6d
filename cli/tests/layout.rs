//! # ScaffRS CLI Layout Integration Tests
//!
//! File: cli/tests/layout.rs
//!
//! ## Overview
//!
//! Integration tests for the `scaffrs layout` subcommand group (`analyze`,
//! `show`, `create`, `workflows`). Every test runs the binary inside its own
//! temporary workspace so no user or project configuration leaks in.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

fn analyze_json(ws: &Workspace, args: &[&str]) -> serde_json::Value {
    let output = ws
        .cmd()
        .args(["layout", "analyze"])
        .args(args)
        .arg("--json")
        .output()
        .expect("Failed to run scaffrs");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("analyze --json did not print JSON")
}

#[test]
fn test_analyze_json_web_app() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    let report = analyze_json(&ws, &["web-app.json"]);
    assert_eq!(report["project_name"], "web-app");
    assert_eq!(report["metrics"]["max_depth"], 2);
    assert_eq!(report["metrics"]["total_files"], 10);
    assert_eq!(report["metrics"]["has_tests_folder"], true);
    assert_eq!(report["metrics"]["has_docs_folder"], true);
    assert_eq!(report["metrics"]["has_ci_config"], false);
    assert_eq!(report["workflows"][0]["kind"], "centralized");
    assert_eq!(report["complexity"]["tier"], "Moderate");
    assert!(report["complexity"]["score"].as_f64().unwrap() < 55.0);
}

#[test]
fn test_analyze_fork_preference_wins() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    let report = analyze_json(&ws, &["web-app.json", "--prefs", "Fork, include CI"]);
    assert_eq!(report["workflows"][0]["kind"], "forking");
    assert_eq!(report["workflows"][0]["confidence"], 1.0);
    assert_eq!(report["metrics"]["has_ci_config"], true);
}

#[test]
fn test_analyze_team_size_changes_recommendation() {
    let ws = Workspace::new();
    ws.write(
        "service.json",
        r#"{
          "src": { "api": ["routes.py", "models.py"], "core": ["config.py"] },
          "tests": { "unit": ["test_api.py"] },
          ".github": { "workflows": ["ci.yml"] },
          "requirements.txt": ""
        }"#,
    );

    let small = analyze_json(&ws, &["service.json", "--team-size", "3"]);
    assert_eq!(small["workflows"][0]["kind"], "trunk-based");

    let large = analyze_json(&ws, &["service.json", "--team-size", "12"]);
    assert_eq!(large["workflows"][0]["kind"], "feature-branch");
}

#[test]
fn test_analyze_unspecified_team_with_large_tested_service() {
    let ws = Workspace::new();
    let modules: Vec<String> = (0..120).map(|i| format!("\"mod_{i}.py\"")).collect();
    ws.write(
        "service.json",
        &format!(
            r#"{{
              "src": {{ "api": [{}], "core": ["config.py"] }},
              "tests": {{ "unit": ["test_api.py"] }},
              ".github": {{ "workflows": ["ci.yml"] }},
              "requirements.txt": ""
            }}"#,
            modules.join(", ")
        ),
    );

    let report = analyze_json(&ws, &["service.json"]);
    assert!(report["metrics"]["total_files"].as_u64().unwrap() >= 100);
    assert_eq!(report["workflows"][0]["kind"], "feature-branch");
}

#[test]
fn test_analyze_picks_hints_out_of_a_phrase() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    let report = analyze_json(&ws, &["web-app.json", "--prefs", "fork include-ci"]);
    assert_eq!(report["workflows"][0]["kind"], "forking");
    assert_eq!(report["metrics"]["has_ci_config"], true);
}

#[test]
fn test_analyze_human_output() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args(["layout", "analyze", "web-app.json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Layout: web-app")
                .and(predicate::str::contains("Files: 10"))
                .and(predicate::str::contains("Complexity:"))
                .and(predicate::str::contains("1. Centralized Workflow")),
        );
}

#[test]
fn test_analyze_existing_directory() {
    let ws = Workspace::new();
    ws.write("repo/src/main.rs", "fn main() {}");
    ws.write("repo/Cargo.toml", "[package]");
    ws.write("repo/tests/cli.rs", "");

    let report = analyze_json(&ws, &["repo"]);
    assert_eq!(report["project_name"], "repo");
    assert_eq!(report["metrics"]["total_files"], 3);
    assert_eq!(report["metrics"]["has_tests_folder"], true);
}

#[test]
fn test_analyze_reads_project_config() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);
    ws.write(
        ".scaffrs.toml",
        "[workflow]\nteam_size = 3\npreferences = \"open source\"\n",
    );

    let report = analyze_json(&ws, &["web-app.json"]);
    assert_eq!(report["team_size"], 3);
    assert_eq!(report["preferences"][0], "open-source");
    assert_eq!(report["workflows"][0]["kind"], "forking");
}

#[test]
fn test_analyze_invalid_tree_fails() {
    let ws = Workspace::new();
    ws.write("null.json", "null");

    ws.cmd()
        .args(["layout", "analyze", "null.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("Invalid tree")));
}

#[test]
fn test_analyze_missing_file_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["layout", "analyze", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read layout file"));
}

#[test]
fn test_analyze_rejects_zero_team_size() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);
    ws.cmd()
        .args(["layout", "analyze", "web-app.json", "--team-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("team size must be at least 1"));
}

#[test]
fn test_show_prints_tree_and_detection() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args(["layout", "show", "web-app.json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Layout Details: web-app")
                .and(predicate::str::contains("Frontend JavaScript/TypeScript"))
                .and(predicate::str::contains("npm/yarn"))
                .and(predicate::str::contains("Header.jsx"))
                .and(predicate::str::contains("Centralized Workflow")),
        );
}

#[test]
fn test_create_generates_project() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args(["layout", "create", "web-app.json", "my-app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'my-app' created successfully"));

    let project = ws.path().join("my-app");
    for file in [
        "src/components/Header.jsx",
        "src/utils/api.js",
        "tests/App.test.js",
        "docs/setup.md",
        "package.json",
        "README.md",
        "CONTRIBUTING.md",
        "LICENSE",
        ".gitignore",
    ] {
        assert!(project.join(file).is_file(), "missing {}", file);
    }
    assert!(!project.join("Dockerfile").exists());

    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.starts_with("# my-app"));
    assert!(readme.contains("Centralized Workflow"));
    let license = fs::read_to_string(project.join("LICENSE")).unwrap();
    assert!(license.contains("my-app"));
}

#[test]
fn test_generated_project_keeps_its_recommendation_on_reanalysis() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args(["layout", "create", "web-app.json", "my-app"])
        .assert()
        .success();

    // The generated LICENSE and CONTRIBUTING.md must not pull the result to forking.
    let report = analyze_json(&ws, &["my-app"]);
    assert_eq!(report["metrics"]["has_license"], true);
    assert_eq!(report["metrics"]["has_contributing_guide"], true);
    assert_eq!(report["workflows"][0]["kind"], "centralized");
    let kinds: Vec<_> = report["workflows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["kind"].as_str().unwrap().to_string())
        .collect();
    assert!(!kinds.contains(&"forking".to_string()));
}

#[test]
fn test_create_refuses_existing_directory_without_force() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);
    fs::create_dir(ws.path().join("my-app")).unwrap();

    ws.cmd()
        .args(["layout", "create", "web-app.json", "my-app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ws.cmd()
        .args(["layout", "create", "web-app.json", "my-app", "--force"])
        .assert()
        .success();
    assert!(ws.path().join("my-app/package.json").is_file());
}

#[test]
fn test_create_with_output_and_preferences() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args([
            "layout",
            "create",
            "web-app.json",
            "shop",
            "-o",
            "out/projects",
            "--prefs",
            "include docker; include ci",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile"));

    let project = ws.path().join("out/projects/shop");
    assert!(project.join("Dockerfile").is_file());
    let ci = fs::read_to_string(project.join(".github/workflows/ci.yml")).unwrap();
    assert!(ci.contains("npm"));
}

#[test]
fn test_create_output_from_environment() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .env("SCAFFRS_OUTPUT_DIR", ws.path().join("from-env"))
        .args(["layout", "create", "web-app.json", "env-app"])
        .assert()
        .success();
    assert!(ws.path().join("from-env/env-app/README.md").is_file());
}

#[test]
fn test_create_with_template_overrides_and_vars() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);
    ws.write(
        "tpl/license.tera",
        "Proprietary license for {{ project_name }}, owned by {{ author }}.",
    );

    ws.cmd()
        .args([
            "layout",
            "create",
            "web-app.json",
            "acme",
            "--templates",
            "tpl",
            "--var",
            "author=Jane Doe",
        ])
        .assert()
        .success();

    let license = fs::read_to_string(ws.path().join("acme/LICENSE")).unwrap();
    assert_eq!(license, "Proprietary license for acme, owned by Jane Doe.");
}

#[test]
fn test_create_with_missing_template_dir_fails() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);

    ws.cmd()
        .args(["layout", "create", "web-app.json", "acme", "--templates", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load templates"));
    assert!(!ws.path().join("acme").exists());
}

#[test]
fn test_create_rejects_invalid_var() {
    let ws = Workspace::new();
    ws.write("web-app.json", WEB_APP_LAYOUT);
    ws.cmd()
        .args(["layout", "create", "web-app.json", "acme", "--var", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_workflows_catalogue() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["layout", "workflows"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("centralized")
                .and(predicate::str::contains("feature-branch"))
                .and(predicate::str::contains("trunk-based"))
                .and(predicate::str::contains("gitflow"))
                .and(predicate::str::contains("monorepo"))
                .and(predicate::str::contains("forking"))
                .and(predicate::str::contains("multirepo")),
        );

    ws.cmd()
        .args(["layout", "workflows", "--steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "));
}
