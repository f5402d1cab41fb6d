//! # ScaffRS Structure Analysis
//!
//! File: cli/src/analysis/mod.rs
//!
//! ## Overview
//!
//! The analysis engine: pure, synchronous functions that take a layout tree and
//! describe it. Nothing here touches the filesystem except
//! `TreeNode::from_path`, which only reads.
//!
//! ## Architecture
//!
//! - `tree`: the immutable `TreeNode` value and its JSON/directory intake
//! - `preferences`: free-text preference hints parsed into a closed set
//! - `analyzer`: `analyze` walks a tree once and produces `Metrics`
//! - `workflow`: `classify` ranks the seven git workflows from `Metrics`
//! - `complexity`: `score` maps `Metrics` to a 0-100 score and `Tier`
//! - `report`: `build_report` runs all three for one layout
//!
//! `classify` and `score` are independent of each other; both only read the
//! `Metrics` value produced by `analyze`. All functions may be called from
//! several threads at once.
//!
//! ## Usage
//!
//! ```rust
//! use crate::analysis::{report::build_report, preferences::Preferences, tree::TreeNode};
//!
//! let root = TreeNode::from_json("my-app", &value)?;
//! let report = build_report(&root, Some(4), &Preferences::parse("include ci"), &config.scoring)?;
//! println!("{}", report.primary_workflow().kind.display_name());
//! ```
//!
pub mod analyzer;
pub mod complexity;
pub mod preferences;
pub mod report;
pub mod tree;
pub mod workflow;
