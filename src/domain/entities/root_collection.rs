//! Root collection entity
//!
//! The forest a tree instance exposes: zero or one root node. Linked instances
//! hold the same collection through a [`SharedRoots`] handle, so a toggle made
//! through one instance is visible through every other.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::entities::SelectionNode;
use crate::domain::value_objects::SelectionState;
use crate::error::{TreeLinkError, TreeLinkResult};

/// Shared handle to a root collection. Reference identity is what "linked"
/// means: two instances are mirrored iff their handles are `Rc::ptr_eq`.
pub type SharedRoots = Rc<RefCell<RootCollection>>;

/// Zero or one root nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootCollection {
    root: Option<SelectionNode>,
}

impl RootCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_root(root: SelectionNode) -> Self {
        Self { root: Some(root) }
    }

    /// Wrap into a fresh shared handle.
    pub fn into_shared(self) -> SharedRoots {
        Rc::new(RefCell::new(self))
    }

    pub fn root(&self) -> Option<&SelectionNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of roots (0 or 1)
    pub fn len(&self) -> usize {
        usize::from(self.root.is_some())
    }

    /// Every node, depth-first pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &SelectionNode> {
        self.root.iter().flat_map(|r| r.subtree())
    }

    pub fn find(&self, path: &str) -> Option<&SelectionNode> {
        self.root.as_ref()?.find(path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Nodes whose state is not `Unselected` (Mixed folders count).
    pub fn selected_node_count(&self) -> usize {
        self.nodes().filter(|n| n.state().is_any_selected()).count()
    }

    /// Topmost fully selected nodes: a selected folder stands for its whole
    /// subtree, so its descendants are not listed again.
    pub fn selected_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        if let Some(root) = &self.root {
            collect_selected(root, &mut paths);
        }
        paths
    }

    /// Select the whole tree. Returns true if anything changed.
    pub fn select_all(&mut self) -> bool {
        self.root
            .as_mut()
            .is_some_and(|r| r.set_selected(SelectionState::Selected))
    }

    /// Set a node's selection, cascade to its subtree and bubble the tri-state
    /// up to the root in one step.
    ///
    /// Returns `Ok(true)` if any state changed. Deselecting the root directly
    /// is ignored (`Ok(false)`).
    pub fn set_selected(&mut self, path: &str, target: SelectionState) -> TreeLinkResult<bool> {
        let (root, indices) = self.locate_mut(path)?;
        let changed = match root.descendant_mut(&indices) {
            Some(node) => node.set_selected(target),
            None => return Err(not_found(path)),
        };
        if changed {
            bubble_up(root, &indices);
        }
        Ok(changed)
    }

    /// Selected goes to Unselected; Unselected and Mixed go to Selected.
    pub fn toggle(&mut self, path: &str) -> TreeLinkResult<bool> {
        let current = self.find(path).ok_or_else(|| not_found(path))?.state();
        self.set_selected(path, current.toggled())
    }

    pub fn set_expanded(
        &mut self,
        path: &str,
        expanded: bool,
        recursive: bool,
    ) -> TreeLinkResult<bool> {
        let (root, indices) = self.locate_mut(path)?;
        let node = root.descendant_mut(&indices).ok_or_else(|| not_found(path))?;
        Ok(if recursive {
            node.set_expanded_recursive(expanded)
        } else {
            node.set_expanded(expanded)
        })
    }

    /// Copy this collection's selection and expansion onto `fresh`, a newly
    /// built tree for the same path.
    ///
    /// Nodes that were not here before start expanded and take their parent's
    /// state, or Selected under a Mixed parent (the state a fresh load gives).
    /// Interior states are recomputed afterwards.
    pub fn carry_state_into(&self, fresh: &mut SelectionNode) {
        let known: HashMap<&str, &SelectionNode> =
            self.nodes().map(|n| (n.path(), n)).collect();
        carry_node(fresh, &known, SelectionState::Selected);
        fresh.normalize();
    }

    fn locate_mut(&mut self, path: &str) -> TreeLinkResult<(&mut SelectionNode, Vec<usize>)> {
        let root = self.root.as_mut().ok_or_else(|| not_found(path))?;
        let indices = root.locate(path).ok_or_else(|| not_found(path))?;
        Ok((root, indices))
    }
}

/// Walk from the changed node's parent to the root, stopping at the first
/// ancestor whose state does not change.
fn bubble_up(root: &mut SelectionNode, indices: &[usize]) {
    for depth in (0..indices.len()).rev() {
        let Some(ancestor) = root.descendant_mut(&indices[..depth]) else {
            break;
        };
        if !ancestor.recompute_from_children() {
            break;
        }
    }
}

fn carry_node(
    node: &mut SelectionNode,
    known: &HashMap<&str, &SelectionNode>,
    inherited: SelectionState,
) {
    let state = match known.get(node.path()) {
        Some(previous) => {
            node.restore(previous.state(), previous.is_expanded());
            previous.state()
        }
        None => {
            node.restore(inherited, true);
            inherited
        }
    };
    let for_children = match state {
        SelectionState::Mixed => SelectionState::Selected,
        other => other,
    };
    for child in node.children_mut() {
        carry_node(child, known, for_children);
    }
}

fn collect_selected(node: &SelectionNode, out: &mut Vec<String>) {
    match node.state() {
        SelectionState::Selected => out.push(node.path().to_string()),
        SelectionState::Mixed => {
            for child in node.children() {
                collect_selected(child, out);
            }
        }
        SelectionState::Unselected => {}
    }
}

fn not_found(path: &str) -> TreeLinkError {
    TreeLinkError::NodeNotFound {
        path: path.to_string(),
    }
}
