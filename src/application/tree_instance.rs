//! Tree Instance
//!
//! One named, independently addressable tree (one per tab or view). Builds its
//! root collection from a [`TreeSource`], applies an optional overlay, and
//! publishes the result with a `StructureChanged` event. Selection changes made
//! through the instance fire `SelectionChanged`.
//!
//! `TreeInstance` is a cheap handle (`Rc` inside): clones refer to the same
//! instance. All state sits behind short-lived `RefCell` borrows that are
//! released before any event is delivered, so sinks may freely call back into
//! this or any other instance.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::entities::{Overlay, RootCollection, SelectionNode, SharedRoots};
use crate::domain::ports::{SubscriptionId, TreeEvent, TreeEventSink, TreeSource};
use crate::domain::value_objects::{IgnoredNames, InstanceId, SelectionState};
use crate::error::TreeLinkResult;

/// A single tree view and its selection state
#[derive(Clone)]
pub struct TreeInstance {
    inner: Rc<InstanceInner>,
}

struct InstanceInner {
    id: InstanceId,
    source: Rc<dyn TreeSource>,
    ignored: RefCell<IgnoredNames>,
    path: RefCell<Option<PathBuf>>,
    roots: RefCell<SharedRoots>,
    sinks: RefCell<Vec<(SubscriptionId, Rc<dyn TreeEventSink>)>>,
    next_subscription: Cell<u64>,
}

impl TreeInstance {
    /// Create an empty instance that builds trees from `source`.
    pub fn new(id: impl Into<InstanceId>, source: Rc<dyn TreeSource>) -> Self {
        Self {
            inner: Rc::new(InstanceInner {
                id: id.into(),
                source,
                ignored: RefCell::new(IgnoredNames::empty()),
                path: RefCell::new(None),
                roots: RefCell::new(RootCollection::empty().into_shared()),
                sinks: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    /// Builder: directory names the source should skip
    pub fn with_ignored_names(self, ignored: IgnoredNames) -> Self {
        self.set_ignored_names(ignored);
        self
    }

    /// Takes effect on the next rebuild.
    pub fn set_ignored_names(&self, ignored: IgnoredNames) {
        *self.inner.ignored.borrow_mut() = ignored;
    }

    pub fn id(&self) -> &InstanceId {
        &self.inner.id
    }

    /// Currently loaded source path (`None` when empty)
    pub fn path(&self) -> Option<PathBuf> {
        self.inner.path.borrow().clone()
    }

    /// Handle to the exposed root collection.
    ///
    /// The handle is replaced (not mutated) on every structure change, so
    /// holders should re-read it after `StructureChanged`.
    pub fn roots(&self) -> SharedRoots {
        Rc::clone(&self.inner.roots.borrow())
    }

    /// True when both instances expose the very same collection.
    pub fn shares_roots_with(&self, other: &TreeInstance) -> bool {
        Rc::ptr_eq(&self.inner.roots.borrow(), &other.inner.roots.borrow())
    }

    /// Load (or clear) the tree for `path`.
    ///
    /// - empty or unresolvable path: publishes an empty collection
    /// - same path as loaded and no overlay: no-op, returns false
    /// - otherwise: fresh tree, everything Selected and expanded, then the
    ///   overlay (if any), then publish
    ///
    /// Returns true if a new collection was published.
    pub fn load(&self, path: &Path, overlay: Option<&Overlay>) -> bool {
        let requested = (!path.as_os_str().is_empty()).then(|| path.to_path_buf());
        if overlay.is_none() && *self.inner.path.borrow() == requested {
            tracing::trace!(instance = %self.inner.id, path = %path.display(), "path already loaded");
            return false;
        }

        let tree = requested.as_deref().and_then(|p| self.build_fresh(p));
        let collection = match tree {
            Some(mut root) => {
                if let Some(overlay) = overlay {
                    overlay.apply_to(&mut root);
                }
                RootCollection::with_root(root)
            }
            None => {
                if requested.is_some() {
                    tracing::debug!(
                        instance = %self.inner.id,
                        path = %path.display(),
                        "source produced no tree, clearing"
                    );
                }
                RootCollection::empty()
            }
        };

        tracing::debug!(
            instance = %self.inner.id,
            path = %path.display(),
            nodes = collection.node_count(),
            "publishing tree"
        );
        self.publish(collection.into_shared(), requested);
        true
    }

    /// Rebuild the current path from the source, keeping the current
    /// selection and expansion. Returns false when nothing is loaded.
    ///
    /// Nodes that appeared since the last build take their parent's state
    /// (Selected under a Mixed parent); if the tree was empty, the result is
    /// what a fresh `load` gives.
    pub fn reload(&self) -> bool {
        let Some(path) = self.path() else {
            return false;
        };
        let collection = match self.build_fresh(&path) {
            Some(mut root) => {
                self.roots().borrow().carry_state_into(&mut root);
                RootCollection::with_root(root)
            }
            None => RootCollection::empty(),
        };

        tracing::debug!(
            instance = %self.inner.id,
            path = %path.display(),
            nodes = collection.node_count(),
            "publishing reloaded tree"
        );
        self.publish(collection.into_shared(), Some(path));
        true
    }

    /// Source tree for `path`, every node Selected and expanded.
    fn build_fresh(&self, path: &Path) -> Option<SelectionNode> {
        let mut root = self.inner.source.build(path, &self.inner.ignored.borrow())?;
        root.set_selected(SelectionState::Selected);
        root.set_expanded_recursive(true);
        Some(root)
    }

    /// Sparse overlay of nodes deviating from Unselected + Expanded.
    pub fn extract_state(&self) -> Overlay {
        Overlay::capture(&self.roots().borrow())
    }

    /// Nodes whose state is not Unselected.
    pub fn selected_node_count(&self) -> usize {
        self.roots().borrow().selected_node_count()
    }

    /// Topmost fully selected paths, for exporters.
    pub fn selected_paths(&self) -> Vec<String> {
        self.roots().borrow().selected_paths()
    }

    /// Set a node's selection (cascade down, recompute up) and notify.
    pub fn set_selected(&self, path: &str, target: SelectionState) -> TreeLinkResult<bool> {
        let changed = self.roots().borrow_mut().set_selected(path, target)?;
        if changed {
            self.notify_selection_changed(path);
        }
        Ok(changed)
    }

    /// User click: Selected goes to Unselected, anything else to Selected.
    pub fn toggle(&self, path: &str) -> TreeLinkResult<bool> {
        let changed = self.roots().borrow_mut().toggle(path)?;
        if changed {
            self.notify_selection_changed(path);
        }
        Ok(changed)
    }

    /// Expansion changes are not announced; views read the flag when drawing.
    pub fn set_expanded(&self, path: &str, expanded: bool, recursive: bool) -> TreeLinkResult<bool> {
        self.roots()
            .borrow_mut()
            .set_expanded(path, expanded, recursive)
    }

    pub fn subscribe(&self, sink: Rc<dyn TreeEventSink>) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.sinks.borrow_mut().push((id, sink));
        id
    }

    /// Returns false if the subscription was not found.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut sinks = self.inner.sinks.borrow_mut();
        let before = sinks.len();
        sinks.retain(|(id, _)| *id != subscription);
        sinks.len() != before
    }

    /// Expose `roots` (someone else's collection) instead of our own tree.
    pub(crate) fn adopt(&self, roots: SharedRoots, path: Option<PathBuf>) {
        self.publish(roots, path);
    }

    /// Swap the exposed collection for a deep copy of itself.
    pub(crate) fn detach(&self) {
        let copy = self.roots().borrow().clone();
        let path = self.path();
        self.publish(copy.into_shared(), path);
    }

    pub(crate) fn notify_selection_changed(&self, path: &str) {
        self.emit(&TreeEvent::SelectionChanged {
            instance: self.inner.id.clone(),
            path: path.to_string(),
        });
    }

    fn publish(&self, roots: SharedRoots, path: Option<PathBuf>) {
        *self.inner.roots.borrow_mut() = roots;
        *self.inner.path.borrow_mut() = path.clone();
        self.emit(&TreeEvent::StructureChanged {
            instance: self.inner.id.clone(),
            path,
        });
    }

    fn emit(&self, event: &TreeEvent) {
        let sinks: Vec<Rc<dyn TreeEventSink>> = self
            .inner
            .sinks
            .borrow()
            .iter()
            .map(|(_, sink)| Rc::clone(sink))
            .collect();
        for sink in sinks {
            sink.on_tree_event(event);
        }
    }
}

impl std::fmt::Debug for TreeInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeInstance")
            .field("id", &self.inner.id)
            .field("path", &self.inner.path.borrow())
            .field("nodes", &self.inner.roots.borrow().borrow().node_count())
            .finish()
    }
}
