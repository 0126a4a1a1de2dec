//! Random tree shapes shared by the property modules.

use proptest::prelude::*;
use treelink::{RootCollection, SelectionNode};

/// Shape of a tree: each node is the list of its children
#[derive(Debug, Clone)]
pub struct Shape(pub Vec<Shape>);

pub fn shape() -> impl Strategy<Value = Shape> {
    Just(Shape(Vec::new())).prop_recursive(4, 40, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Shape)
    })
}

fn build(shape: &Shape, path: String) -> SelectionNode {
    let children: Vec<SelectionNode> = shape
        .0
        .iter()
        .enumerate()
        .map(|(i, child)| build(child, format!("{path}/n{i}")))
        .collect();
    SelectionNode::from_path(path).with_children(children)
}

/// A fully selected, expanded collection rooted at `/r`
pub fn collection(shape: &Shape) -> RootCollection {
    let mut roots = RootCollection::with_root(build(shape, "/r".to_string()));
    roots.select_all();
    roots
}

/// Every node path in pre-order
pub fn paths(roots: &RootCollection) -> Vec<String> {
    roots.nodes().map(|n| n.path().to_string()).collect()
}

/// An edit: (node index, selected?) with the index taken modulo the node count
pub fn edits() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((any::<usize>(), any::<bool>()), 0..24)
}
