//! Local File System Tree Source
//!
//! Implements the TreeSource port by walking a directory with the `ignore`
//! crate's walker. Standard filters (hidden files, .gitignore) are off: the
//! tree shows what is on disk except the configured ignored directory names.

use std::cmp::Ordering;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};

use crate::domain::entities::{NodeKind, SelectionNode};
use crate::domain::ports::TreeSource;
use crate::domain::value_objects::IgnoredNames;

/// Tree source over the local file system
#[derive(Debug, Clone, Copy)]
pub struct FsTreeSource {
    include_files: bool,
    follow_links: bool,
}

impl Default for FsTreeSource {
    fn default() -> Self {
        Self {
            include_files: true,
            follow_links: false,
        }
    }
}

impl FsTreeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: include regular files as leaves (default true)
    pub fn with_files(mut self, include_files: bool) -> Self {
        self.include_files = include_files;
        self
    }

    /// Builder: descend into symlinked directories (default false)
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

impl TreeSource for FsTreeSource {
    fn build(&self, root: &Path, ignored: &IgnoredNames) -> Option<SelectionNode> {
        if let Err(err) = std::fs::read_dir(root) {
            tracing::debug!(path = %root.display(), error = %err, "root is not a readable directory");
            return None;
        }

        let ignored = ignored.clone();
        let include_files = self.include_files;
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| keep_entry(entry, &ignored, include_files));

        let mut stack: Vec<PendingDir> = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping entry that could not be read");
                    continue;
                }
            };

            let depth = entry.depth();
            while stack.len() > depth.max(1) {
                close_top(&mut stack);
            }
            if depth > 0 && stack.len() != depth {
                continue;
            }

            let path = entry.path().to_string_lossy().into_owned();
            if is_dir(&entry) {
                stack.push(PendingDir::new(SelectionNode::from_path(path)));
            } else if let Some(parent) = stack.last_mut() {
                let name = entry.file_name().to_string_lossy().into_owned();
                parent.children.push(SelectionNode::file(path, name));
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        stack.pop().map(PendingDir::finish)
    }
}

/// A directory whose children are still being collected
struct PendingDir {
    node: SelectionNode,
    children: Vec<SelectionNode>,
}

impl PendingDir {
    fn new(node: SelectionNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    fn finish(mut self) -> SelectionNode {
        self.children.sort_by(directories_first);
        self.node.with_children(self.children)
    }
}

fn close_top(stack: &mut Vec<PendingDir>) {
    if let Some(done) = stack.pop() {
        let node = done.finish();
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn directories_first(a: &SelectionNode, b: &SelectionNode) -> Ordering {
    let rank = |n: &SelectionNode| u8::from(n.kind() == NodeKind::File);
    rank(a).cmp(&rank(b)).then_with(|| a.name().cmp(b.name()))
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
}

fn keep_entry(entry: &DirEntry, ignored: &IgnoredNames, include_files: bool) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if !is_dir(entry) {
        return include_files;
    }
    if ignored.is_ignored(entry.file_name()) {
        return false;
    }
    // Unreadable directories are left out with their subtree. The walker would
    // yield the directory first and report the failed listing only afterwards,
    // by which point it is already a (wrongly empty) node, so probe here.
    match std::fs::read_dir(entry.path()) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(path = %entry.path().display(), error = %err, "skipping unreadable directory");
            false
        }
    }
}
