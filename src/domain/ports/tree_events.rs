//! Tree Event Port
//!
//! Observable interface for tree instances and the link coordinator.
//! Delivery is synchronous, on the thread that made the change.

use std::path::PathBuf;

use crate::domain::value_objects::InstanceId;

/// Event emitted by a tree instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// The root collection was replaced; observers must re-read `roots()`
    StructureChanged {
        instance: InstanceId,
        path: Option<PathBuf>,
    },

    /// A node's tri-state changed (cascade and ancestors already settled)
    SelectionChanged { instance: InstanceId, path: String },
}

/// Event emitted by the link coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// Group membership changed; carries the groups after the change
    LinksChanged { groups: Vec<Vec<InstanceId>> },
}

/// Trait for receiving tree events
///
/// Implementations can be:
/// - UI views that re-render on change
/// - JsonEventSink: NDJSON event stream
/// - TracingEventSink: events as log records
/// - any `Fn(&TreeEvent)` closure
pub trait TreeEventSink {
    fn on_tree_event(&self, event: &TreeEvent);
}

/// Trait for receiving link-group events
pub trait LinkEventSink {
    fn on_link_event(&self, event: &LinkEvent);
}

impl<F: Fn(&TreeEvent)> TreeEventSink for F {
    fn on_tree_event(&self, event: &TreeEvent) {
        self(event)
    }
}

impl<F: Fn(&LinkEvent)> LinkEventSink for F {
    fn on_link_event(&self, event: &LinkEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl TreeEventSink for NoopEventSink {
    fn on_tree_event(&self, _event: &TreeEvent) {}
}

impl LinkEventSink for NoopEventSink {
    fn on_link_event(&self, _event: &LinkEvent) {}
}
