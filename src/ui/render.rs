//! Text rendering of trees, status bars and view headers.
//!
//! Only expanded nodes show their children; collapsed subtrees are drawn as a
//! single line.

use std::path::Path;

use crate::domain::entities::{RootCollection, SelectionNode};
use crate::domain::value_objects::{InstanceId, SelectionState};

use super::theme::Icons;

/// Render a single tree node to a string
pub fn render_tree_node(node: &SelectionNode, depth: usize, supports_unicode: bool) -> String {
    let icons = Icons::new(supports_unicode);
    let indent = "  ".repeat(depth);

    let state_icon = match node.state() {
        SelectionState::Selected => icons.selected,
        SelectionState::Unselected => icons.unselected,
        SelectionState::Mixed => icons.partial,
    };

    // Expansion icon (only for nodes with children)
    let expand_icon = if node.is_leaf() {
        " ".repeat(icons.expand.chars().count() + 1)
    } else if node.is_expanded() {
        format!("{} ", icons.expand)
    } else {
        format!("{} ", icons.collapse)
    };

    format!("{}{}{} {}", indent, expand_icon, state_icon, node.name())
}

/// Render every visible node, one per line
pub fn render_tree(roots: &RootCollection, supports_unicode: bool) -> String {
    let Some(root) = roots.root() else {
        return String::from("(empty)");
    };

    let mut lines = Vec::new();
    push_visible(root, 0, supports_unicode, &mut lines);
    lines.join("\n")
}

fn push_visible(node: &SelectionNode, depth: usize, supports_unicode: bool, lines: &mut Vec<String>) {
    lines.push(render_tree_node(node, depth, supports_unicode));
    if node.is_expanded() {
        for child in node.children() {
            push_visible(child, depth + 1, supports_unicode, lines);
        }
    }
}

/// Render the status bar showing selection counts
pub fn render_status_bar(selected: usize, total: usize, supports_unicode: bool) -> String {
    let icons = Icons::new(supports_unicode);
    format!(
        "Selected: {}/{} nodes\n\n{} = selected    {} = partial    {} = not selected",
        selected, total, icons.selected, icons.partial, icons.unselected
    )
}

/// Render the one-line header above a view in a session
pub fn render_view_header(
    id: &InstanceId,
    path: Option<&Path>,
    leader: Option<&InstanceId>,
    supports_unicode: bool,
) -> String {
    let path = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| String::from("(no path)"));
    match leader {
        Some(leader) => format!(
            "{}  {}  {} linked (leader: {})",
            id,
            path,
            Icons::new(supports_unicode).link,
            leader
        ),
        None => format!("{}  {}", id, path),
    }
}
