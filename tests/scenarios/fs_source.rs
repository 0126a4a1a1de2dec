//! Scenario: trees built from a real directory.

use std::rc::Rc;

use tempfile::tempdir;
use treelink::{FsTreeSource, IgnoredNames, NodeKind, SelectionState, TreeInstance};

use crate::common::write_files;

fn view(ignored: &[&str]) -> TreeInstance {
    TreeInstance::new("disk", Rc::new(FsTreeSource::new()))
        .with_ignored_names(IgnoredNames::new(ignored.iter().copied()))
}

#[test]
fn directory_loads_fully_selected_without_ignored_names() {
    let dir = tempdir().unwrap();
    write_files(
        dir.path(),
        &["src/main.rs", "src/util/mod.rs", ".git/HEAD", "target/debug/", "Cargo.toml"],
    );
    let view = view(&[".git", "target"]);

    assert!(view.load(dir.path(), None));

    let roots = view.roots();
    let roots = roots.borrow();
    let root = roots.root().unwrap();
    let names: Vec<&str> = root.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["src", "Cargo.toml"]);
    assert_eq!(roots.node_count(), 6);
    assert!(roots
        .nodes()
        .all(|n| n.state() == SelectionState::Selected && n.is_expanded()));
    assert_eq!(root.children()[1].kind(), NodeKind::File);
}

#[test]
fn missing_directory_loads_empty() {
    let dir = tempdir().unwrap();
    let view = view(&[]);

    assert!(view.load(&dir.path().join("gone"), None));
    assert!(view.roots().borrow().is_empty());
    assert_eq!(view.selected_node_count(), 0);
}

#[test]
fn saved_state_survives_a_rebuild() {
    let dir = tempdir().unwrap();
    write_files(dir.path(), &["a/one.txt", "a/two.txt", "b/three.txt"]);
    let root = dir.path().to_string_lossy().into_owned();

    let first = view(&[]);
    first.load(dir.path(), None);
    first
        .set_selected(&format!("{root}/a/two.txt"), SelectionState::Unselected)
        .unwrap();
    first.set_expanded(&format!("{root}/b"), false, false).unwrap();
    let overlay = first.extract_state();
    let json = serde_json::to_string(&overlay).unwrap();

    let second = view(&[]);
    second.load(dir.path(), Some(&serde_json::from_str(&json).unwrap()));

    assert_eq!(*second.roots().borrow(), *first.roots().borrow());
}

#[test]
fn reload_gives_new_files_their_folder_state() {
    let dir = tempdir().unwrap();
    write_files(dir.path(), &["docs/intro.md", "drafts/old.md"]);
    let root = dir.path().to_string_lossy().into_owned();
    let view = view(&[]);
    view.load(dir.path(), None);
    view.set_selected(&format!("{root}/drafts"), SelectionState::Unselected)
        .unwrap();

    write_files(dir.path(), &["docs/new.md", "drafts/wip.md", "fresh/a.txt"]);
    assert!(view.reload());

    let roots = view.roots();
    let roots = roots.borrow();
    let state = |p: &str| roots.find(&format!("{root}/{p}")).map(|n| n.state());
    assert_eq!(state("docs/intro.md"), Some(SelectionState::Selected));
    assert_eq!(state("docs/new.md"), Some(SelectionState::Selected));
    assert_eq!(state("docs"), Some(SelectionState::Selected));
    assert_eq!(state("drafts/wip.md"), Some(SelectionState::Unselected));
    assert_eq!(state("drafts"), Some(SelectionState::Unselected));
    // the root was Mixed, so a new top-level folder starts Selected
    assert_eq!(state("fresh/a.txt"), Some(SelectionState::Selected));
    assert_eq!(roots.root().map(|r| r.state()), Some(SelectionState::Mixed));
}

#[test]
fn reload_after_directory_appears_matches_fresh_load() {
    let dir = tempdir().unwrap();
    let later = dir.path().join("later");
    let reloaded = view(&[]);
    reloaded.load(&later, None);
    assert!(reloaded.roots().borrow().is_empty());

    write_files(&later, &["a/one.txt", "two.txt"]);
    assert!(reloaded.reload());

    let fresh = view(&[]);
    fresh.load(&later, None);
    assert!(!reloaded.roots().borrow().is_empty());
    assert_eq!(*reloaded.roots().borrow(), *fresh.roots().borrow());
    assert_eq!(
        reloaded.roots().borrow().root().map(|r| r.state()),
        Some(SelectionState::Selected)
    );
}

#[test]
fn selected_paths_lists_topmost_selected_nodes() {
    let dir = tempdir().unwrap();
    write_files(dir.path(), &["a/one.txt", "b/two.txt", "b/three.txt"]);
    let root = dir.path().to_string_lossy().into_owned();
    let view = view(&[]);
    view.load(dir.path(), None);

    view.set_selected(&format!("{root}/b/two.txt"), SelectionState::Unselected)
        .unwrap();

    assert_eq!(
        view.selected_paths(),
        vec![format!("{root}/a"), format!("{root}/b/three.txt")]
    );
}
