//! # ScaffRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each other
//! `.rs` file here is compiled as its own test crate and pulls this one in
//! with `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The layout used throughout the documentation: a small React app.
pub const WEB_APP_LAYOUT: &str = r#"{
  "src": {
    "components": ["Header.jsx", "Footer.jsx"],
    "pages": ["Home.jsx", "About.jsx"],
    "utils": ["api.js", "helpers.js"]
  },
  "tests": ["App.test.js"],
  "docs": ["setup.md"],
  "package.json": "",
  "README.md": ""
}"#;

/// Returns a command for the compiled `scaffrs` binary.
pub fn scaffrs_cmd() -> Command {
    Command::cargo_bin("scaffrs").expect("Failed to find scaffrs binary for testing")
}

/// A scratch workspace that isolates the binary from the developer's own
/// configuration: `HOME`/`XDG_CONFIG_HOME` point inside it and a `.git`
/// directory stops the project config search at its root.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp workspace");
        fs::create_dir_all(dir.path().join(".git")).expect("Failed to create .git marker");
        fs::create_dir_all(dir.path().join("home/.config")).expect("Failed to create home");
        Workspace { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` inside the workspace and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write workspace file");
        path
    }

    /// `scaffrs` running inside the workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = scaffrs_cmd();
        cmd.current_dir(self.path())
            .env("HOME", self.path().join("home"))
            .env("XDG_CONFIG_HOME", self.path().join("home/.config"))
            .env_remove("SCAFFRS_OUTPUT_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}
