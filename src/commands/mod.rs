//! Command handlers for the treelink binary

pub mod session;
pub mod tree;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use treelink::config::TreeConfig;
use treelink::domain::entities::Overlay;
use treelink::domain::ports::{LinkEventSink, TreeEventSink};
use treelink::domain::value_objects::IgnoredNames;
use treelink::infrastructure::{FsTreeSource, JsonEventSink, TracingEventSink};
use treelink::ui::detect_capabilities;

/// Where results and events go for one invocation
#[derive(Clone)]
pub struct Output {
    json: Option<Rc<JsonEventSink>>,
    unicode: bool,
}

impl Output {
    pub fn new(json: bool, ascii: bool) -> Self {
        Self {
            json: json.then(|| Rc::new(JsonEventSink::stdout())),
            unicode: !ascii && detect_capabilities().supports_unicode,
        }
    }

    pub fn is_json(&self) -> bool {
        self.json.is_some()
    }

    pub fn unicode(&self) -> bool {
        self.unicode
    }

    /// NDJSON on stdout in JSON mode, debug logs otherwise
    pub fn tree_sink(&self) -> Rc<dyn TreeEventSink> {
        match &self.json {
            Some(sink) => Rc::clone(sink) as Rc<dyn TreeEventSink>,
            None => Rc::new(TracingEventSink),
        }
    }

    pub fn link_sink(&self) -> Rc<dyn LinkEventSink> {
        match &self.json {
            Some(sink) => Rc::clone(sink) as Rc<dyn LinkEventSink>,
            None => Rc::new(TracingEventSink),
        }
    }

    /// Write one result object as a JSON line
    pub fn emit(&self, value: serde_json::Value) -> Result<()> {
        println!("{}", serde_json::to_string(&value)?);
        Ok(())
    }
}

/// Canonical form of a root path; unresolvable paths are kept as given and
/// load as an empty tree.
pub(crate) fn resolve_root(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Node path for a user-supplied name relative to `root` (absolute names pass through).
pub(crate) fn node_path(root: &Path, node: &str) -> String {
    let node = node.trim_end_matches(['/', '\\']);
    let path = if node.is_empty() || node == "." {
        root.to_path_buf()
    } else {
        root.join(node)
    };
    path.to_string_lossy().into_owned()
}

pub(crate) fn fs_source(tree: &TreeConfig, no_files: bool) -> Rc<FsTreeSource> {
    Rc::new(
        FsTreeSource::new()
            .with_files(tree.include_files && !no_files)
            .with_follow_links(tree.follow_links),
    )
}

pub(crate) fn ignored_names(tree: &TreeConfig, extra: &[String]) -> IgnoredNames {
    IgnoredNames::new(tree.ignored_names.iter().chain(extra).map(String::as_str))
}

pub(crate) fn read_overlay(path: &Path) -> Result<Overlay> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read overlay {}", path.display()))?;
    Overlay::from_json(&content)
        .with_context(|| format!("invalid overlay JSON in {}", path.display()))
}
