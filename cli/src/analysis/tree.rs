//! # ScaffRS Layout Tree
//!
//! File: cli/src/analysis/tree.rs
//!
//! ## Overview
//!
//! `TreeNode` is the owned, immutable description of a project layout that every
//! analysis step consumes. A tree is built once per request, either from the JSON
//! layout format produced by the structure suggester or by walking an existing
//! directory on disk, and is read-only afterwards.
//!
//! ## Invariants
//!
//! - A `File` never has children (the fields are private and only the
//!   constructors below can build nodes).
//! - Children of a `Directory` have unique, non-empty names that contain no path
//!   separators.
//! - Ownership is a strict tree: children are owned values, so back-references
//!   and cycles cannot be expressed.
//!
//! ## JSON layout format
//!
//! ```json
//! {
//!   "src": { "components": ["Button.tsx", "Card.tsx"] },
//!   "tests": ["app.test.ts"],
//!   "package.json": "",
//!   "README.md": null
//! }
//! ```
//!
//! Objects are directories, strings and `null` are files, and arrays are
//! directories whose string items are files and whose object items are merged
//! into the same directory.
//!
use crate::core::error::ScaffError;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NodeKind {
    Directory,
    File,
}

/// One filesystem entry in a project layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    kind: NodeKind,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a file node.
    pub fn file(name: impl Into<String>) -> Result<Self, ScaffError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(TreeNode {
            name,
            kind: NodeKind::File,
            children: Vec::new(),
        })
    }

    /// Creates a directory node, rejecting duplicate sibling names.
    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Result<Self, ScaffError> {
        let name = name.into();
        validate_name(&name)?;
        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(child.name.as_str()) {
                return Err(ScaffError::InvalidTree(format!(
                    "duplicate entry '{}' in directory '{}'",
                    child.name, name
                )));
            }
        }
        Ok(TreeNode {
            name,
            kind: NodeKind::Directory,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Every descendant with its path relative to this node, parents before
    /// children, siblings in stored order.
    pub fn walk(&self) -> Vec<(PathBuf, &TreeNode)> {
        let mut entries = Vec::new();
        let mut pending: Vec<(PathBuf, &TreeNode)> = self
            .children
            .iter()
            .rev()
            .map(|c| (PathBuf::from(&c.name), c))
            .collect();
        while let Some((path, node)) = pending.pop() {
            for child in node.children.iter().rev() {
                pending.push((path.join(&child.name), child));
            }
            entries.push((path, node));
        }
        entries
    }

    /// Builds a tree from the JSON layout format. The JSON root becomes a
    /// directory named `root_name`.
    pub fn from_json(root_name: &str, value: &Value) -> Result<Self, ScaffError> {
        match value {
            Value::Null => Err(ScaffError::InvalidTree("root is null".to_string())),
            Value::Object(_) => TreeNode::directory(root_name, json_children(value, root_name)?),
            other => Err(ScaffError::InvalidTree(format!(
                "root must be a JSON object, found {}",
                json_type(other)
            ))),
        }
    }

    /// Builds a tree by walking an existing directory. Symlinks are followed so
    /// linked folders count toward the layout; a link back to one of its own
    /// ancestors is reported as a cycle. `.git` is skipped.
    pub fn from_path(root: &Path) -> Result<Self, ScaffError> {
        if !root.is_dir() {
            return Err(ScaffError::FileSystem(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }
        let root_name = root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "project".to_string());

        // Open directories, innermost last: (name, children collected so far).
        let mut stack: Vec<(String, Vec<TreeNode>)> = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || e.file_name() != ".git");

        for entry_result in walker {
            let entry = entry_result.map_err(|e| match e.loop_ancestor() {
                Some(ancestor) => ScaffError::InvalidTree(format!(
                    "cycle detected: '{}' links back to '{}'",
                    e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    ancestor.display()
                )),
                None => ScaffError::FileSystem(format!(
                    "failed to walk '{}': {}",
                    root.display(),
                    e
                )),
            })?;

            // Close every directory that is not an ancestor of this entry.
            while stack.len() > entry.depth() {
                close_directory(&mut stack)?;
            }

            if entry.depth() == 0 {
                stack.push((root_name.clone(), Vec::new()));
            } else if entry.file_type().is_dir() {
                stack.push((entry.file_name().to_string_lossy().into_owned(), Vec::new()));
            } else if let Some((_, children)) = stack.last_mut() {
                children.push(TreeNode::file(entry.file_name().to_string_lossy())?);
            }
        }

        while stack.len() > 1 {
            close_directory(&mut stack)?;
        }
        let (name, children) = stack.pop().ok_or_else(|| {
            ScaffError::InvalidTree(format!("no entries found under '{}'", root.display()))
        })?;
        debug!(
            "Built layout tree '{}' from {} ({} top-level entries)",
            name,
            root.display(),
            children.len()
        );
        TreeNode::directory(name, children)
    }
}

fn close_directory(stack: &mut Vec<(String, Vec<TreeNode>)>) -> Result<(), ScaffError> {
    if let Some((name, children)) = stack.pop() {
        let dir = TreeNode::directory(name, children)?;
        if let Some((_, parent_children)) = stack.last_mut() {
            parent_children.push(dir);
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ScaffError> {
    if name.trim().is_empty() {
        return Err(ScaffError::InvalidTree("entry name is empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ScaffError::InvalidTree(format!(
            "entry name '{}' must be a single path segment",
            name
        )));
    }
    Ok(())
}

fn json_children(value: &Value, path: &str) -> Result<Vec<TreeNode>, ScaffError> {
    let mut children = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                children.push(json_entry(key, child, path)?);
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(file_name) => children.push(TreeNode::file(file_name.as_str())?),
                    Value::Object(map) => {
                        for (key, child) in map {
                            children.push(json_entry(key, child, path)?);
                        }
                    }
                    other => {
                        return Err(ScaffError::InvalidTree(format!(
                            "'{}' lists an unsupported {} item",
                            path,
                            json_type(other)
                        )))
                    }
                }
            }
        }
        other => {
            return Err(ScaffError::InvalidTree(format!(
                "'{}' is a {}, not a directory",
                path,
                json_type(other)
            )))
        }
    }
    Ok(children)
}

fn json_entry(key: &str, value: &Value, parent: &str) -> Result<TreeNode, ScaffError> {
    let path = format!("{}/{}", parent, key);
    match value {
        Value::Object(_) | Value::Array(_) => TreeNode::directory(key, json_children(value, &path)?),
        Value::String(_) | Value::Null => TreeNode::file(key),
        other => Err(ScaffError::InvalidTree(format!(
            "'{}' has an unsupported {} value",
            path,
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
