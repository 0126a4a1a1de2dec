//! Property tests for overlay capture and replay.

use proptest::prelude::*;
use treelink::{Overlay, RootCollection, SelectionState};

use crate::trees::{collection, edits, paths, shape};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: capture, then replay onto a fresh identical tree, reproduces
    /// selection and expansion exactly (also through JSON).
    #[test]
    fn property_overlay_round_trip(
        tree in shape(),
        selections in edits(),
        collapses in edits(),
    ) {
        let mut roots = collection(&tree);
        let all = paths(&roots);
        for (index, selected) in &selections {
            let state = if *selected { SelectionState::Selected } else { SelectionState::Unselected };
            roots.set_selected(&all[index % all.len()], state).unwrap();
        }
        for (index, expanded) in &collapses {
            roots.set_expanded(&all[index % all.len()], *expanded, false).unwrap();
        }

        let overlay = Overlay::capture(&roots);
        let json = serde_json::to_string(&overlay).unwrap();
        let overlay: Overlay = serde_json::from_str(&json).unwrap();

        let fresh = collection(&tree);
        let mut root = fresh.root().unwrap().clone();
        overlay.apply_to(&mut root);
        prop_assert_eq!(RootCollection::with_root(root), roots);
    }

    /// PROPERTY: the overlay never records a node sitting at the baseline.
    #[test]
    fn property_overlay_is_sparse(tree in shape(), selections in edits()) {
        let mut roots = collection(&tree);
        let all = paths(&roots);
        for (index, selected) in &selections {
            let state = if *selected { SelectionState::Selected } else { SelectionState::Unselected };
            roots.set_selected(&all[index % all.len()], state).unwrap();
        }

        let overlay = Overlay::capture(&roots);
        for record in overlay.records() {
            prop_assert!(record.selected != Some(SelectionState::Unselected) || !record.expanded);
        }
        let unselected = roots.nodes().filter(|n| n.state() == SelectionState::Unselected).count();
        prop_assert_eq!(overlay.len() + unselected, roots.node_count());
    }
}
