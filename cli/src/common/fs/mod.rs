//! # ScaffRS Filesystem Utilities
//!
//! File: cli/src/common/fs/mod.rs
//!
//! Filesystem helpers shared by command handlers. `io` covers directory
//! creation and file reads/writes with contextual errors.
//!
pub mod io;
