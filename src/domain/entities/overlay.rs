//! Overlay entity
//!
//! A sparse, path-keyed record of selection/expansion deviations from the
//! persistence baseline (Unselected + Expanded). Captured from a live tree with
//! [`Overlay::capture`] and replayed onto a freshly built tree with
//! [`Overlay::apply_to`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{RootCollection, SelectionNode};
use crate::domain::value_objects::SelectionState;
use crate::error::TreeLinkResult;

/// Selection state a node has when no overlay record mentions it
pub const BASELINE_STATE: SelectionState = SelectionState::Unselected;

/// Expansion a node has when no overlay record mentions it
pub const BASELINE_EXPANDED: bool = true;

/// One node's deviation from the baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOverlay {
    pub path: String,
    /// `None` (JSON `null`) leaves the node at the baseline state.
    #[serde(default)]
    pub selected: Option<SelectionState>,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
}

fn default_expanded() -> bool {
    BASELINE_EXPANDED
}

impl NodeOverlay {
    fn of(node: &SelectionNode) -> Self {
        Self {
            path: node.path().to_string(),
            selected: Some(node.state()),
            expanded: node.is_expanded(),
        }
    }
}

/// Ordered list of overlay records (depth-first order of the captured tree)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overlay {
    records: Vec<NodeOverlay>,
}

impl Overlay {
    pub fn new(records: Vec<NodeOverlay>) -> Self {
        Self { records }
    }

    /// Record every node whose (state, expanded) pair differs from the baseline.
    pub fn capture(roots: &RootCollection) -> Self {
        let records = roots
            .nodes()
            .filter(|n| n.state() != BASELINE_STATE || n.is_expanded() != BASELINE_EXPANDED)
            .map(NodeOverlay::of)
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[NodeOverlay] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parse the JSON array form written by [`Overlay::to_json`].
    pub fn from_json(json: &str) -> TreeLinkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TreeLinkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replay onto a tree, depth-first by exact path match.
    ///
    /// Nodes without a record fall back to the baseline. Afterwards interior
    /// states are recomputed from the leaves, so a hand-edited or stale overlay
    /// can never leave the tree breaking the tri-state rule.
    pub fn apply_to(&self, root: &mut SelectionNode) {
        let by_path: HashMap<&str, &NodeOverlay> =
            self.records.iter().map(|r| (r.path.as_str(), r)).collect();
        apply_node(root, &by_path);
        root.normalize();
    }
}

fn apply_node(node: &mut SelectionNode, by_path: &HashMap<&str, &NodeOverlay>) {
    match by_path.get(node.path()) {
        Some(record) => node.restore(
            record.selected.unwrap_or(BASELINE_STATE),
            record.expanded,
        ),
        None => node.restore(BASELINE_STATE, BASELINE_EXPANDED),
    }
    for child in node.children_mut() {
        apply_node(child, by_path);
    }
}
