//! TreeSource port - abstraction over tree building
//!
//! Builds the initial node hierarchy for a root path. Implementations decide
//! where the hierarchy comes from (local disk, a fixture, a remote listing);
//! the selection engine only sees the resulting nodes.

use std::path::Path;

use crate::domain::entities::SelectionNode;
use crate::domain::value_objects::IgnoredNames;

/// Abstract tree builder
///
/// Implementations:
/// - `FsTreeSource` - walks a local directory
/// - `InMemoryTreeSource` - serves prebuilt trees (tests, previews)
///
/// Contract:
/// - a missing or inaccessible root yields `None`, never an error
/// - subtrees that cannot be enumerated are skipped, not fatal
/// - directories whose name is in `ignored` are left out with their subtree
pub trait TreeSource {
    fn build(&self, root: &Path, ignored: &IgnoredNames) -> Option<SelectionNode>;
}

impl<T: TreeSource + ?Sized> TreeSource for std::rc::Rc<T> {
    fn build(&self, root: &Path, ignored: &IgnoredNames) -> Option<SelectionNode> {
        (**self).build(root, ignored)
    }
}
