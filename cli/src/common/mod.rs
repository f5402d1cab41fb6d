//! # ScaffRS Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Utilities that are not specific to one command group. Currently this is the
//! filesystem layer used when materialising generated projects.
//!
//! ```rust
//! use crate::common::fs::io;
//! io::write_string_to_file(&path, &content)?;
//! ```
//!
pub mod fs;
