//! Selection node entity
//!
//! A node in one folder hierarchy. Owns its children, carries a tri-state
//! selection and an expansion flag. The parent link is the parent's path,
//! kept for lookup only.
//!
//! Downward cascade lives here. Upward recomputation needs the ancestor chain,
//! which only the owning [`RootCollection`](super::RootCollection) can walk.

use std::path::Path;

use crate::domain::value_objects::SelectionState;

/// Whether the node came from a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Directory,
    File,
}

/// A node in a selectable folder tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionNode {
    path: String,
    name: String,
    kind: NodeKind,
    state: SelectionState,
    expanded: bool,
    parent: Option<String>,
    children: Vec<SelectionNode>,
}

impl SelectionNode {
    /// Create a directory node, unselected and expanded.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind: NodeKind::Directory,
            state: SelectionState::Unselected,
            expanded: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a file node (always a leaf).
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::File,
            ..Self::new(path, name)
        }
    }

    /// Create a directory node named after the last component of `path`.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self::new(path, name)
    }

    /// Attach children, then derive this node's state from them.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SelectionNode>) -> Self {
        for child in children {
            self.push_child(child);
        }
        self.recompute_from_children();
        self
    }

    fn push_child(&mut self, mut child: SelectionNode) {
        child.parent = Some(self.path.clone());
        self.children.push(child);
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Path of the parent node, `None` for a root.
    pub fn parent_path(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[SelectionNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Set the selection of this node and its whole subtree.
    ///
    /// A root only accepts `Selected`; `Mixed` is never a valid target since
    /// it is derived, not chosen. Returns true if any state in the subtree
    /// changed. Ancestors are not touched here.
    pub fn set_selected(&mut self, target: SelectionState) -> bool {
        if target == SelectionState::Mixed {
            tracing::debug!(path = %self.path, "ignoring request to set a derived Mixed state");
            return false;
        }
        if self.is_root() && target != SelectionState::Selected {
            tracing::trace!(path = %self.path, "root cannot be deselected directly");
            return false;
        }
        self.cascade(target)
    }

    fn cascade(&mut self, target: SelectionState) -> bool {
        let mut changed = self.state != target;
        self.state = target;
        for child in &mut self.children {
            changed |= child.cascade(target);
        }
        changed
    }

    /// Returns true if the flag changed.
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        let changed = self.expanded != expanded;
        self.expanded = expanded;
        changed
    }

    /// Set the expansion flag on this node and every descendant.
    pub fn set_expanded_recursive(&mut self, expanded: bool) -> bool {
        let mut changed = self.set_expanded(expanded);
        for child in &mut self.children {
            changed |= child.set_expanded_recursive(expanded);
        }
        changed
    }

    /// Derive this node's state from its children.
    ///
    /// Selected iff all children are Selected, Unselected iff all are
    /// Unselected, Mixed otherwise. A leaf is never Mixed. Returns true if the
    /// state changed, so callers bubbling upward know when to stop.
    pub fn recompute_from_children(&mut self) -> bool {
        let derived = match SelectionState::combine(self.children.iter().map(|c| c.state)) {
            Some(state) => state,
            None if self.state == SelectionState::Mixed => SelectionState::Unselected,
            None => return false,
        };
        let changed = self.state != derived;
        self.state = derived;
        changed
    }

    /// Recompute every interior node bottom-up.
    pub(crate) fn normalize(&mut self) {
        for child in &mut self.children {
            child.normalize();
        }
        self.recompute_from_children();
    }

    /// Overwrite state and expansion without cascading (overlay application).
    pub(crate) fn restore(&mut self, state: SelectionState, expanded: bool) {
        self.state = state;
        self.expanded = expanded;
    }

    pub(crate) fn children_mut(&mut self) -> &mut [SelectionNode] {
        &mut self.children
    }

    /// Drop every descendant for which `keep` returns false (with its subtree).
    pub(crate) fn retain_descendants<F>(&mut self, keep: &F)
    where
        F: Fn(&SelectionNode) -> bool,
    {
        self.children.retain(|c| keep(c));
        for child in &mut self.children {
            child.retain_descendants(keep);
        }
        self.recompute_from_children();
    }

    /// Lazy depth-first, pre-order walk of this node and its descendants.
    pub fn subtree(&self) -> Subtree<'_> {
        Subtree { stack: vec![self] }
    }

    /// Find a node in this subtree by exact path.
    pub fn find(&self, path: &str) -> Option<&SelectionNode> {
        self.subtree().find(|n| n.path == path)
    }

    /// Child indices leading from this node to the node with `path`.
    ///
    /// An empty vector means this node itself.
    pub(crate) fn locate(&self, path: &str) -> Option<Vec<usize>> {
        if self.path == path {
            return Some(Vec::new());
        }
        for (i, child) in self.children.iter().enumerate() {
            if let Some(mut rest) = child.locate(path) {
                rest.insert(0, i);
                return Some(rest);
            }
        }
        None
    }

    pub(crate) fn descendant_mut(&mut self, indices: &[usize]) -> Option<&mut SelectionNode> {
        let mut node = self;
        for &i in indices {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }
}

/// Pre-order iterator returned by [`SelectionNode::subtree`]
pub struct Subtree<'a> {
    stack: Vec<&'a SelectionNode>,
}

impl<'a> Iterator for Subtree<'a> {
    type Item = &'a SelectionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
