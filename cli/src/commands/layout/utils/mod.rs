//! # ScaffRS Layout Utilities
//!
//! File: cli/src/commands/layout/utils/mod.rs
//!
//! ## Overview
//!
//! Helpers shared by the `scaffrs layout` subcommands.
//!
//! - `inputs`: load a layout source and resolve team/preference hints
//! - `tree_printer`: render a layout in `tree` style
//! - `project_detector`: infer language, build system and technologies
//! - `boilerplate`: produce file content for `layout create`
//!
pub mod boilerplate;
pub mod inputs;
pub mod project_detector;
pub mod tree_printer;
