//! Scenario: a user opens several views of one project and links them.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use treelink::{
    InMemoryTreeSource, InstanceId, LinkCoordinator, LinkEvent, LinkState, SelectionNode,
    SelectionState, TreeEvent, TreeInstance,
};

use crate::common::{linked_views, record_link_events, record_tree_events};

fn id(name: &str) -> InstanceId {
    InstanceId::from(name)
}

fn state(view: &TreeInstance, path: &str) -> Option<SelectionState> {
    view.roots().borrow().find(path).map(|n| n.state())
}

#[test]
fn tri_state_walkthrough() {
    let source = Rc::new(InMemoryTreeSource::new().with_tree(
        SelectionNode::from_path("/proj").with_children([
            SelectionNode::from_path("/proj/src"),
            SelectionNode::from_path("/proj/docs"),
        ]),
    ));
    let view = TreeInstance::new("main", source);
    view.load(Path::new("/proj"), None);
    assert_eq!(state(&view, "/proj"), Some(SelectionState::Selected));

    view.set_selected("/proj/docs", SelectionState::Unselected).unwrap();
    assert_eq!(state(&view, "/proj"), Some(SelectionState::Mixed));

    view.set_selected("/proj/src", SelectionState::Unselected).unwrap();
    assert_eq!(state(&view, "/proj"), Some(SelectionState::Unselected));

    view.set_selected("/proj/src", SelectionState::Selected).unwrap();
    assert_eq!(state(&view, "/proj"), Some(SelectionState::Mixed));
}

#[test]
fn linked_views_share_one_tree() {
    let (coordinator, views) = linked_views(&["left", "right"], "/proj");
    assert!(!views[0].shares_roots_with(&views[1]));

    coordinator.create_link(&id("left"), &id("right")).unwrap();
    assert!(views[0].shares_roots_with(&views[1]));

    views[0].toggle("/proj/docs").unwrap();
    assert_eq!(state(&views[1], "/proj/docs"), Some(SelectionState::Unselected));
    assert_eq!(state(&views[1], "/proj"), Some(SelectionState::Mixed));
    assert_eq!(views[1].selected_node_count(), views[0].selected_node_count());
}

#[test]
fn linking_in_a_chain_builds_one_group() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");

    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("b"), &id("c")).unwrap();

    assert_eq!(coordinator.groups(), vec![vec![id("a"), id("b"), id("c")]]);
    assert_eq!(coordinator.leader_of(&id("c")), Some(id("a")));
    assert!(views[0].shares_roots_with(&views[2]));
    let LinkState::Member(group) = coordinator.link_state(&id("a")) else {
        panic!("a should be linked");
    };
    assert_eq!(coordinator.link_state(&id("c")), LinkState::Member(group));
}

#[test]
fn every_view_hears_about_a_selection_once() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("a"), &id("c")).unwrap();
    let recorders: Vec<_> = views.iter().map(record_tree_events).collect();

    views[2].toggle("/proj/src/lib.rs").unwrap();

    for (view, events) in views.iter().zip(&recorders) {
        assert_eq!(
            events.borrow().as_slice(),
            &[TreeEvent::SelectionChanged {
                instance: view.id().clone(),
                path: "/proj/src/lib.rs".to_string(),
            }]
        );
    }
}

#[test]
fn reloading_any_member_moves_the_whole_group() {
    let (coordinator, views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("a"), &id("c")).unwrap();

    views[1].load(Path::new("/site"), None);

    for view in &views {
        assert_eq!(view.path(), Some(PathBuf::from("/site")));
        assert!(view.roots().borrow().find("/site/index.html").is_some());
    }
    assert!(views[0].shares_roots_with(&views[2]));
    assert_eq!(coordinator.leader_of(&id("b")), Some(id("a")));
}

#[test]
fn merging_two_groups_follows_the_first_leader() {
    let (coordinator, views) = linked_views(&["a", "b", "c", "d"], "/proj");
    views[2].load(Path::new("/site"), None);
    coordinator.create_link(&id("a"), &id("b")).unwrap();
    coordinator.create_link(&id("c"), &id("d")).unwrap();
    let events = record_link_events(&coordinator);

    coordinator.create_link(&id("b"), &id("d")).unwrap();

    assert_eq!(
        events.borrow().as_slice(),
        &[LinkEvent::LinksChanged {
            groups: vec![vec![id("a"), id("b"), id("c"), id("d")]],
        }]
    );
    for view in &views {
        assert_eq!(view.path(), Some(PathBuf::from("/proj")));
        assert!(view.shares_roots_with(&views[0]));
    }
}

#[test]
fn saved_groups_restore_in_a_new_session() {
    let (coordinator, _views) = linked_views(&["a", "b", "c"], "/proj");
    coordinator.create_link(&id("c"), &id("a")).unwrap();
    let saved = serde_json::to_string(&coordinator.groups()).unwrap();

    let (restored, views) = linked_views(&["a", "b", "c"], "/proj");
    let groups: Vec<Vec<InstanceId>> = serde_json::from_str(&saved).unwrap();
    restored.load_groups(groups).unwrap();

    assert_eq!(restored.groups(), vec![vec![id("c"), id("a")]]);
    assert!(views[0].shares_roots_with(&views[2]));
    assert_eq!(restored.link_state(&id("b")), LinkState::Unlinked);
}

#[test]
fn link_requires_registration() {
    let coordinator = LinkCoordinator::new();
    assert!(coordinator.create_link(&id("x"), &id("y")).is_err());
    assert!(coordinator.linked_peers(&id("x")).is_empty());
}
