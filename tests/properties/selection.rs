//! Property tests for tri-state selection.

use proptest::prelude::*;
use treelink::{RootCollection, SelectionNode, SelectionState};

use crate::trees::{collection, edits, paths, shape};

fn target(selected: bool) -> SelectionState {
    if selected {
        SelectionState::Selected
    } else {
        SelectionState::Unselected
    }
}

fn apply(roots: &mut RootCollection, edits: &[(usize, bool)]) {
    let all = paths(roots);
    for (index, selected) in edits {
        let path = &all[index % all.len()];
        roots.set_selected(path, target(*selected)).unwrap();
    }
}

fn consistent(node: &SelectionNode) -> bool {
    let own = match SelectionState::combine(node.children().iter().map(|c| c.state())) {
        Some(derived) => node.state() == derived,
        None => node.state() != SelectionState::Mixed,
    };
    own && node.children().iter().all(consistent)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after any edit sequence every node agrees with its children,
    /// and no leaf is Mixed.
    #[test]
    fn property_ancestors_follow_children(tree in shape(), edits in edits()) {
        let mut roots = collection(&tree);
        apply(&mut roots, &edits);
        prop_assert!(consistent(roots.root().unwrap()));
    }

    /// PROPERTY: deselecting the root directly never changes anything.
    #[test]
    fn property_root_deselect_is_noop(tree in shape(), edits in edits()) {
        let mut roots = collection(&tree);
        apply(&mut roots, &edits);
        let before = roots.clone();

        prop_assert!(!roots.set_selected("/r", SelectionState::Unselected).unwrap());
        prop_assert_eq!(roots, before);
    }

    /// PROPERTY: setting the same state twice equals setting it once.
    #[test]
    fn property_set_selected_idempotent(
        tree in shape(),
        edits in edits(),
        pick in any::<usize>(),
        selected in any::<bool>(),
    ) {
        let mut roots = collection(&tree);
        apply(&mut roots, &edits);
        let all = paths(&roots);
        let path = &all[pick % all.len()];

        roots.set_selected(path, target(selected)).unwrap();
        let once = roots.clone();
        prop_assert!(!roots.set_selected(path, target(selected)).unwrap());
        prop_assert_eq!(roots, once);
    }

    /// PROPERTY: a selection cascades to the whole subtree.
    #[test]
    fn property_cascade_reaches_every_descendant(
        tree in shape(),
        pick in any::<usize>(),
    ) {
        let mut roots = collection(&tree);
        let all = paths(&roots);
        let path = all[pick % all.len()].clone();
        if path != "/r" {
            roots.set_selected(&path, SelectionState::Unselected).unwrap();
            let node = roots.find(&path).unwrap();
            prop_assert!(node.subtree().all(|n| n.state() == SelectionState::Unselected));
        }
    }
}
