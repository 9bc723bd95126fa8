use std::path::PathBuf;

use serde::Serialize;

use super::entry::EntryId;
use super::size::format_size;
use super::tree::{SelectionSummary, TargetTree};

/// Format the expanded part of the tree with checkboxes and sizes.
pub fn format_tree(tree: &TargetTree) -> String {
    let mut output = String::new();
    for &root in tree.roots() {
        format_tree_recursive(tree, root, &mut output, "", true, 0);
    }
    output
}

fn format_tree_recursive(
    tree: &TargetTree,
    id: EntryId,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
) {
    let Some(entry) = tree.get(id) else {
        return;
    };

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let checkbox = if entry.checked { "[x]" } else { "[ ]" };
    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let error_indicator = if entry.error.is_some() { " [!]" } else { "" };

    output.push_str(&format!(
        "{:>10}  {}{}{} {} {}{}\n",
        format_size(entry.size),
        prefix,
        connector,
        checkbox,
        entry.icon.glyph(),
        name,
        error_indicator
    ));

    if !entry.expanded {
        return;
    }

    let new_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let children = tree.loaded_children(id);
    for (i, &child) in children.iter().enumerate() {
        format_tree_recursive(
            tree,
            child,
            output,
            &new_prefix,
            i == children.len() - 1,
            depth + 1,
        );
    }
}

/// Plain list of selected paths, one per line.
pub fn format_selection(items: &[PathBuf]) -> String {
    items
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct SelectionReport<'a> {
    items: &'a [PathBuf],
    count: usize,
    total_size: u64,
}

/// JSON report of the selection.
pub fn format_selection_json(
    items: &[PathBuf],
    summary: SelectionSummary,
    pretty: bool,
) -> serde_json::Result<String> {
    let report = SelectionReport {
        items,
        count: summary.count,
        total_size: summary.total_size,
    };
    if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
}
