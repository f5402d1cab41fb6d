//! # ScaffRS Filesystem I/O
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` that add path context to errors and create
//! parent directories on demand. `layout create` writes every generated file
//! through these helpers.
//!
//! ## Examples
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&project_dir.join("src"))?;
//! io::write_string_to_file(&project_dir.join("src/main.rs"), "fn main() {}")?;
//! let added = io::write_if_absent(&project_dir.join("LICENSE"), &license)?;
//! ```
//!
use crate::core::error::{Result, ScaffError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Creates `path` (and its parents) unless it already exists as a directory.
///
/// # Errors
///
/// Fails when `path` exists but is not a directory, or when creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ScaffError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, replacing any existing file. Parent
/// directories are created as needed.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Writes `content` only when nothing exists at `path` yet. Returns whether
/// the file was written.
pub fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        debug!("Keeping existing file: {:?}", path);
        return Ok(false);
    }
    write_string_to_file(path, content)?;
    info!("Added {:?}", path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&new_dir)?;
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parents_and_reads_back() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("src/components/App.tsx");
        write_string_to_file(&file_path, "export {};")?;
        assert_eq!(read_file_to_string(&file_path)?, "export {};");
        Ok(())
    }

    #[test]
    fn test_write_if_absent_keeps_existing() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("LICENSE");
        assert!(write_if_absent(&path, "first")?);
        assert!(!write_if_absent(&path, "second")?);
        assert_eq!(read_file_to_string(&path)?, "first");
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() {
        let base_dir = tempdir().unwrap();
        assert!(read_file_to_string(&base_dir.path().join("nonexistent.txt")).is_err());
    }
}
