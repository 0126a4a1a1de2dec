//! Common test utilities for treelink scenario and property tests.
//!
//! This module provides:
//! - Fixture trees for the in-memory source
//! - `write_files`: lay out a directory tree on disk
//! - Event recorders for tree and link events

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use treelink::{
    InMemoryTreeSource, LinkCoordinator, LinkEvent, SelectionNode, TreeEvent, TreeInstance,
};

/// `/proj` with `src/{main.rs, lib.rs}`, `docs/guide.md` and `README.md`
pub fn proj_tree() -> SelectionNode {
    SelectionNode::from_path("/proj").with_children([
        SelectionNode::from_path("/proj/src").with_children([
            SelectionNode::file("/proj/src/main.rs", "main.rs"),
            SelectionNode::file("/proj/src/lib.rs", "lib.rs"),
        ]),
        SelectionNode::from_path("/proj/docs")
            .with_children([SelectionNode::file("/proj/docs/guide.md", "guide.md")]),
        SelectionNode::file("/proj/README.md", "README.md"),
    ])
}

/// `/site` with a single `index.html`
pub fn site_tree() -> SelectionNode {
    SelectionNode::from_path("/site")
        .with_children([SelectionNode::file("/site/index.html", "index.html")])
}

pub fn memory_source() -> Rc<InMemoryTreeSource> {
    Rc::new(
        InMemoryTreeSource::new()
            .with_tree(proj_tree())
            .with_tree(site_tree()),
    )
}

/// Register `names` with a new coordinator, each loaded from `path`.
pub fn linked_views(names: &[&str], path: &str) -> (LinkCoordinator, Vec<TreeInstance>) {
    let coordinator = LinkCoordinator::new();
    let source = memory_source();
    let views = names
        .iter()
        .map(|name| {
            let view = TreeInstance::new(*name, source.clone());
            view.load(Path::new(path), None);
            coordinator.register(*name, view.clone());
            view
        })
        .collect();
    (coordinator, views)
}

/// Create each relative path under `root`; names ending in `/` are directories.
pub fn write_files(root: &Path, paths: &[&str]) {
    for path in paths {
        let full = root.join(path.trim_end_matches('/'));
        if path.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, path.as_bytes()).unwrap();
        }
    }
}

pub fn record_tree_events(view: &TreeInstance) -> Rc<RefCell<Vec<TreeEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let events = Rc::clone(&events);
        move |e: &TreeEvent| events.borrow_mut().push(e.clone())
    };
    view.subscribe(Rc::new(sink));
    events
}

pub fn record_link_events(coordinator: &LinkCoordinator) -> Rc<RefCell<Vec<LinkEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let events = Rc::clone(&events);
        move |e: &LinkEvent| events.borrow_mut().push(e.clone())
    };
    coordinator.subscribe(Rc::new(sink));
    events
}
