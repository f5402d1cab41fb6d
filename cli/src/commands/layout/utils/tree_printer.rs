//! # ScaffRS Tree Printer
//!
//! File: cli/src/commands/layout/utils/tree_printer.rs
//!
//! ## Overview
//!
//! Renders a `TreeNode` in the style of the `tree` utility. `layout show`
//! prints it with bold directory names; the README template embeds the plain
//! variant.
//!
//! Within each directory, sub-directories come first, then files, each group
//! sorted by name, so the output does not depend on the order the layout was
//! written in.
//!
//! ```text
//! my-app/
//! ├── src
//! │   └── main.rs
//! └── Cargo.toml
//! ```
//!
use crate::analysis::tree::TreeNode;
use std::fmt::Write as FmtWrite;

const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const SPACER: &str = "    ";
const BOLD_START: &str = "\x1b[1m";
const BOLD_END: &str = "\x1b[0m";

/// Whether directory names are wrapped in ANSI bold codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStyle {
    Plain,
    Bold,
}

/// Renders `root` and everything below it. The root line ends with `/`.
pub fn render_tree(root: &TreeNode, style: TreeStyle) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}/", styled(root.name(), style));
    let mut prefix = String::new();
    write_children(root, &mut prefix, style, &mut output);
    output
}

fn write_children(dir: &TreeNode, prefix: &mut String, style: TreeStyle, output: &mut String) {
    let entries = sorted_children(dir);
    let count = entries.len();
    for (index, entry) in entries.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { ELBOW } else { TEE };
        if entry.is_dir() {
            let _ = writeln!(output, "{}{}{}", prefix, connector, styled(entry.name(), style));
            let segment = if is_last { SPACER } else { PIPE };
            prefix.push_str(segment);
            write_children(entry, prefix, style, output);
            prefix.truncate(prefix.len() - segment.len());
        } else {
            let _ = writeln!(output, "{}{}{}", prefix, connector, entry.name());
        }
    }
}

fn sorted_children(dir: &TreeNode) -> Vec<&TreeNode> {
    let mut entries: Vec<&TreeNode> = dir.children().iter().collect();
    entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name().cmp(b.name())));
    entries
}

fn styled(name: &str, style: TreeStyle) -> String {
    match style {
        TreeStyle::Plain => name.to_string(),
        TreeStyle::Bold => format!("{}{}{}", BOLD_START, name, BOLD_END),
    }
}
