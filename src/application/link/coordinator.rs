//! Link Coordinator
//!
//! Keeps linked tree instances mirrored:
//! 1. Group bookkeeping (create, join, merge, leave, dissolve) is delegated to
//!    the domain's [`LinkGroups`]
//! 2. Each group is paired with one shared root collection, the leader's
//! 3. A relay subscribed to every registered instance forwards structure and
//!    selection changes to the instance's peers
//!
//! Every fan-out runs under the `propagating` flag. Events raised by peers
//! while it is set (they fire `StructureChanged` when handed a collection) are
//! not forwarded again, which is what stops two linked instances from
//! bouncing updates back and forth forever.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::application::TreeInstance;
use crate::domain::entities::{
    GroupId, LinkGroups, LinkOutcome, LinkState, SharedRoots, UnlinkOutcome,
};
use crate::domain::ports::{LinkEvent, LinkEventSink, SubscriptionId, TreeEvent, TreeEventSink};
use crate::domain::value_objects::InstanceId;
use crate::error::{TreeLinkError, TreeLinkResult};

/// Coordinates link groups across registered tree instances
///
/// Cheap to clone; clones share state. Single-threaded by construction.
#[derive(Clone, Default)]
pub struct LinkCoordinator {
    inner: Rc<CoordinatorInner>,
}

#[derive(Default)]
struct CoordinatorInner {
    instances: RefCell<HashMap<InstanceId, Registration>>,
    groups: RefCell<LinkGroups>,
    shared: RefCell<HashMap<GroupId, SharedRoots>>,
    propagating: Cell<bool>,
    sinks: RefCell<Vec<(SubscriptionId, Rc<dyn LinkEventSink>)>>,
    next_subscription: Cell<u64>,
}

struct Registration {
    instance: TreeInstance,
    subscription: SubscriptionId,
}

impl LinkCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) an instance under `id`.
    ///
    /// A previous registration for `id` is unsubscribed first. If `id` is
    /// currently linked, the new instance immediately adopts the group's
    /// shared collection.
    pub fn register(&self, id: impl Into<InstanceId>, instance: TreeInstance) {
        let id = id.into();
        if let Some(previous) = self.inner.instances.borrow_mut().remove(&id) {
            previous.instance.unsubscribe(previous.subscription);
        }

        let relay = PeerRelay {
            coordinator: Rc::downgrade(&self.inner),
            id: id.clone(),
        };
        let subscription = instance.subscribe(Rc::new(relay));
        self.inner.instances.borrow_mut().insert(
            id.clone(),
            Registration {
                instance: instance.clone(),
                subscription,
            },
        );
        tracing::debug!(instance = %id, "registered tree instance");

        let group = self.inner.groups.borrow().group_of(&id).map(|g| g.id());
        if let Some(group) = group {
            if let Some(shared) = self.inner.shared_of(group) {
                if !Rc::ptr_eq(&shared, &instance.roots()) {
                    let path = self.inner.leader_path(group);
                    let _guard = PropagationGuard::enter(&self.inner.propagating);
                    instance.adopt(shared, path);
                }
            }
        }
    }

    /// Unlink (if linked) and forget `id`.
    pub fn unregister(&self, id: &InstanceId) -> TreeLinkResult<()> {
        self.remove_link(id)?;
        if let Some(registration) = self.inner.instances.borrow_mut().remove(id) {
            registration.instance.unsubscribe(registration.subscription);
        }
        Ok(())
    }

    pub fn is_registered(&self, id: &InstanceId) -> bool {
        self.inner.instances.borrow().contains_key(id)
    }

    /// The instance registered under `id`.
    pub fn instance(&self, id: &InstanceId) -> TreeLinkResult<TreeInstance> {
        self.inner.instance(id)
    }

    /// Link `a` and `b`. Returns true if group membership changed.
    ///
    /// Both ids must be registered.
    pub fn create_link(&self, a: &InstanceId, b: &InstanceId) -> TreeLinkResult<bool> {
        self.inner.instance(a)?;
        self.inner.instance(b)?;

        let outcome = self.inner.groups.borrow_mut().link(a, b);
        match outcome {
            LinkOutcome::Unchanged => {
                tracing::trace!(%a, %b, "already linked");
                return Ok(false);
            }
            LinkOutcome::Created(group) => {
                tracing::debug!(%a, %b, %group, "created link group");
                self.inner.establish(group, &[b.clone()])?;
            }
            LinkOutcome::Joined { group, member } => {
                tracing::debug!(%member, %group, "joined link group");
                self.inner.establish(group, &[member])?;
            }
            LinkOutcome::Merged { group, retired } => {
                tracing::debug!(%group, retired = ?retired, "merged link groups");
                {
                    let mut shared = self.inner.shared.borrow_mut();
                    for old in retired {
                        shared.remove(&old);
                    }
                }
                let members = self.inner.members_of(group);
                self.inner.establish(group, &members)?;
            }
        }

        self.inner.emit_links_changed();
        Ok(true)
    }

    /// Unlink `id`, leaving it with an independent copy of its tree.
    ///
    /// Returns false if `id` was not linked.
    pub fn remove_link(&self, id: &InstanceId) -> TreeLinkResult<bool> {
        let instance = self.inner.instance(id)?;
        if self.inner.groups.borrow().group_of(id).is_none() {
            return Ok(false);
        }

        {
            let _guard = PropagationGuard::enter(&self.inner.propagating);
            instance.detach();
        }

        let outcome = self.inner.groups.borrow_mut().unlink(id);
        match outcome {
            UnlinkOutcome::NotLinked => return Ok(false),
            UnlinkOutcome::Left {
                group,
                leader_changed,
            } => {
                tracing::debug!(instance = %id, %group, leader_changed, "left link group");
                if leader_changed {
                    let members = self.inner.members_of(group);
                    self.inner.establish(group, &members)?;
                }
            }
            UnlinkOutcome::Dissolved { group, orphan } => {
                tracing::debug!(instance = %id, %group, "dissolved link group");
                self.inner.shared.borrow_mut().remove(&group);
                if let Some(orphan) = orphan {
                    let orphan = self.inner.instance(&orphan)?;
                    let _guard = PropagationGuard::enter(&self.inner.propagating);
                    orphan.detach();
                }
            }
        }

        self.inner.emit_links_changed();
        Ok(true)
    }

    /// Other members of `id`'s group; empty when unlinked.
    pub fn linked_peers(&self, id: &InstanceId) -> Vec<InstanceId> {
        self.inner
            .groups
            .borrow()
            .group_of(id)
            .map(|g| g.peers_of(id))
            .unwrap_or_default()
    }

    pub fn link_state(&self, id: &InstanceId) -> LinkState {
        self.inner.groups.borrow().state_of(id)
    }

    pub fn leader_of(&self, id: &InstanceId) -> Option<InstanceId> {
        self.inner
            .groups
            .borrow()
            .group_of(id)
            .map(|g| g.leader().clone())
    }

    /// Current groups in persistable form.
    pub fn groups(&self) -> Vec<Vec<InstanceId>> {
        self.inner.groups.borrow().to_records()
    }

    /// Replace every group, e.g. when restoring a saved session.
    ///
    /// Ids that are not registered are dropped with a warning (a saved
    /// session may mention views that no longer exist). Every previously
    /// linked instance is detached first, then each restored group adopts its
    /// leader's tree.
    pub fn load_groups(&self, records: Vec<Vec<InstanceId>>) -> TreeLinkResult<()> {
        let records: Vec<Vec<InstanceId>> = records
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter(|id| {
                        let known = self.is_registered(id);
                        if !known {
                            tracing::warn!(instance = %id, "dropping unknown instance from saved link group");
                        }
                        known
                    })
                    .collect()
            })
            .collect();

        let previously_linked = self.inner.groups.borrow().linked_ids();
        {
            let _guard = PropagationGuard::enter(&self.inner.propagating);
            for id in &previously_linked {
                self.inner.instance(id)?.detach();
            }
        }

        let created = self.inner.groups.borrow_mut().replace_all(records);
        self.inner.shared.borrow_mut().clear();
        for group in created {
            let members = self.inner.members_of(group);
            self.inner.establish(group, &members)?;
        }
        tracing::debug!(groups = self.inner.groups.borrow().len(), "loaded link groups");

        self.inner.emit_links_changed();
        Ok(())
    }

    pub fn subscribe(&self, sink: Rc<dyn LinkEventSink>) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.sinks.borrow_mut().push((id, sink));
        id
    }

    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut sinks = self.inner.sinks.borrow_mut();
        let before = sinks.len();
        sinks.retain(|(id, _)| *id != subscription);
        sinks.len() != before
    }

    /// True while a fan-out to peers is in progress.
    pub fn is_propagating(&self) -> bool {
        self.inner.propagating.get()
    }
}

impl CoordinatorInner {
    fn instance(&self, id: &InstanceId) -> TreeLinkResult<TreeInstance> {
        self.instances
            .borrow()
            .get(id)
            .map(|r| r.instance.clone())
            .ok_or_else(|| TreeLinkError::UnknownInstance { id: id.clone() })
    }

    fn members_of(&self, group: GroupId) -> Vec<InstanceId> {
        self.groups
            .borrow()
            .group(group)
            .map(|g| g.members().to_vec())
            .unwrap_or_default()
    }

    fn leader_of_group(&self, group: GroupId) -> Option<InstanceId> {
        self.groups.borrow().group(group).map(|g| g.leader().clone())
    }

    fn leader_path(&self, group: GroupId) -> Option<std::path::PathBuf> {
        let leader = self.leader_of_group(group)?;
        self.instance(&leader).ok()?.path()
    }

    fn shared_of(&self, group: GroupId) -> Option<SharedRoots> {
        self.shared.borrow().get(&group).cloned()
    }

    /// Record the leader's collection as the group's shared state and hand it
    /// to `targets` (members already holding it are skipped).
    fn establish(&self, group: GroupId, targets: &[InstanceId]) -> TreeLinkResult<()> {
        let Some(leader_id) = self.leader_of_group(group) else {
            return Ok(());
        };
        let leader = self.instance(&leader_id)?;
        let roots = leader.roots();
        let path = leader.path();
        self.shared.borrow_mut().insert(group, Rc::clone(&roots));

        let _guard = PropagationGuard::enter(&self.propagating);
        for target in targets.iter().filter(|t| **t != leader_id) {
            let peer = self.instance(target)?;
            if Rc::ptr_eq(&peer.roots(), &roots) {
                continue;
            }
            tracing::trace!(from = %leader_id, to = %target, "broadcasting shared tree");
            peer.adopt(Rc::clone(&roots), path.clone());
        }
        Ok(())
    }

    /// `id` published a new collection: mirror it on every peer.
    fn on_structure_changed(&self, id: &InstanceId) {
        if self.propagating.get() {
            tracing::trace!(instance = %id, "suppressing re-entrant structure change");
            return;
        }
        let Some((group, peers)) = self.peers(id) else {
            return;
        };
        let Ok(source) = self.instance(id) else {
            return;
        };
        let roots = source.roots();
        let path = source.path();
        self.shared.borrow_mut().insert(group, Rc::clone(&roots));

        let _guard = PropagationGuard::enter(&self.propagating);
        for peer_id in peers {
            match self.instance(&peer_id) {
                Ok(peer) => peer.adopt(Rc::clone(&roots), path.clone()),
                Err(err) => tracing::warn!(error = %err, "linked peer vanished"),
            }
        }
    }

    /// Nodes are shared, so only the peers' observers need telling.
    fn on_selection_changed(&self, id: &InstanceId, path: &str) {
        if self.propagating.get() {
            return;
        }
        let Some((_, peers)) = self.peers(id) else {
            return;
        };

        let _guard = PropagationGuard::enter(&self.propagating);
        for peer_id in peers {
            if let Ok(peer) = self.instance(&peer_id) {
                peer.notify_selection_changed(path);
            }
        }
    }

    fn peers(&self, id: &InstanceId) -> Option<(GroupId, Vec<InstanceId>)> {
        let groups = self.groups.borrow();
        let group = groups.group_of(id)?;
        Some((group.id(), group.peers_of(id)))
    }

    fn emit_links_changed(&self) {
        let event = LinkEvent::LinksChanged {
            groups: self.groups.borrow().to_records(),
        };
        let sinks: Vec<Rc<dyn LinkEventSink>> = self
            .sinks
            .borrow()
            .iter()
            .map(|(_, sink)| Rc::clone(sink))
            .collect();
        for sink in sinks {
            sink.on_link_event(&event);
        }
    }
}

/// Subscribed to each registered instance on the coordinator's behalf
struct PeerRelay {
    coordinator: Weak<CoordinatorInner>,
    id: InstanceId,
}

impl TreeEventSink for PeerRelay {
    fn on_tree_event(&self, event: &TreeEvent) {
        let Some(coordinator) = self.coordinator.upgrade() else {
            return;
        };
        match event {
            TreeEvent::StructureChanged { .. } => coordinator.on_structure_changed(&self.id),
            TreeEvent::SelectionChanged { path, .. } => {
                coordinator.on_selection_changed(&self.id, path)
            }
        }
    }
}

/// Sets the propagating flag for its lifetime and restores the previous value.
struct PropagationGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> PropagationGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
