//! # ScaffRS Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Infrastructure shared by the analysis engine and the command handlers.
//!
//! - `config`: loading, merging and validating `.scaffrs.toml` settings
//! - `error`: the `ScaffError` enum and the `Result` alias
//! - `templating`: the Tera engine holding the boilerplate templates
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ScaffError}; // For error handling
//! use crate::core::templating::TemplateEngine; // For rendering boilerplate
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
