//! # ScaffRS Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level command groups of the ScaffRS CLI so `main.rs`
//! can route to them. Each group defines its own argument struct and handler;
//! subcommands are declared inside the group's own `mod.rs`.
//!
//! ## Command Groups
//!
//! - `layout`: analyze, display and scaffold project layouts
//!

/// Command group for project layouts. Includes `analyze`, `show`, `create` and `workflows`.
pub mod layout;
