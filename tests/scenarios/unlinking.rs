//! Scenario: linked views are split apart again.

use std::path::Path;

use treelink::{InstanceId, LinkState, SelectionState, TreeInstance};

use crate::common::{linked_views, record_link_events};

fn id(name: &str) -> InstanceId {
    InstanceId::from(name)
}

fn state(view: &TreeInstance, path: &str) -> Option<SelectionState> {
    view.roots().borrow().find(path).map(|n| n.state())
}

#[test]
fn unlinked_view_keeps_a_copy_of_the_tree() {
    let (coordinator, views) = linked_views(&["a", "b"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    views[1].set_selected("/proj/docs", SelectionState::Unselected).unwrap();
    views[1].set_expanded("/proj/src", false, false).unwrap();
    let at_removal = views[0].roots().borrow().clone();

    coordinator.remove_link(&id("a")).unwrap();

    assert_eq!(coordinator.link_state(&id("a")), LinkState::Unlinked);
    assert_eq!(coordinator.link_state(&id("b")), LinkState::Unlinked);
    assert!(!views[0].shares_roots_with(&views[1]));
    assert_eq!(*views[0].roots().borrow(), at_removal);
    assert_eq!(*views[1].roots().borrow(), at_removal);
}

#[test]
fn former_peers_no_longer_affect_each_other() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.remove_link(&id("a")).unwrap();
    coordinator.create_link(&id("c"), &id("b")).unwrap();

    views[1].toggle("/proj/README.md").unwrap();
    assert_eq!(state(&views[2], "/proj/README.md"), Some(SelectionState::Unselected));
    assert_eq!(state(&views[0], "/proj/README.md"), Some(SelectionState::Selected));

    views[0].toggle("/proj/src").unwrap();
    assert_eq!(state(&views[1], "/proj/src"), Some(SelectionState::Selected));
}

#[test]
fn leader_leaving_hands_the_group_over() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("a"), &id("c")).unwrap();

    coordinator.remove_link(&id("a")).unwrap();
    assert_eq!(coordinator.leader_of(&id("c")), Some(id("b")));

    // the new group still mirrors reloads, the old leader does not follow
    views[2].load(Path::new("/site"), None);
    assert!(views[1].roots().borrow().find("/site").is_some());
    assert!(views[0].roots().borrow().find("/proj").is_some());
}

#[test]
fn unlinking_twice_reports_nothing_new() {
    let (coordinator, _views) = linked_views(&["a", "b"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    let events = record_link_events(&coordinator);

    assert!(coordinator.remove_link(&id("b")).unwrap());
    assert!(!coordinator.remove_link(&id("b")).unwrap());
    assert!(!coordinator.remove_link(&id("a")).unwrap());
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn closing_a_view_unlinks_it() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("b"), &id("c")).unwrap();

    coordinator.unregister(&id("b")).unwrap();

    assert_eq!(coordinator.groups(), vec![vec![id("a"), id("c")]]);
    views[1].toggle("/proj/docs").unwrap();
    assert_eq!(state(&views[0], "/proj/docs"), Some(SelectionState::Selected));
}
