//! In-memory tree source
//!
//! Serves prebuilt trees keyed by root path. Used by tests and by views that
//! preview a tree without touching the disk.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::domain::entities::{NodeKind, SelectionNode};
use crate::domain::ports::TreeSource;
use crate::domain::value_objects::IgnoredNames;

/// Tree source backed by a map of root path to tree
#[derive(Debug, Clone, Default)]
pub struct InMemoryTreeSource {
    trees: HashMap<PathBuf, SelectionNode>,
}

impl InMemoryTreeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a tree under its root node's path
    pub fn with_tree(mut self, root: SelectionNode) -> Self {
        self.insert(root);
        self
    }

    pub fn insert(&mut self, root: SelectionNode) {
        self.trees.insert(PathBuf::from(root.path()), root);
    }
}

impl TreeSource for InMemoryTreeSource {
    fn build(&self, root: &Path, ignored: &IgnoredNames) -> Option<SelectionNode> {
        let mut tree = self.trees.get(root)?.clone();
        if !ignored.is_empty() {
            tree.retain_descendants(&|node: &SelectionNode| {
                node.kind() == NodeKind::File || !ignored.is_ignored(OsStr::new(node.name()))
            });
        }
        Some(tree)
    }
}
