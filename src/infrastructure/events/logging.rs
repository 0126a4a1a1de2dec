//! Tracing Event Sink
//!
//! Forwards tree and link events to `tracing` at debug level, so a session
//! log shows what each view saw without a dedicated UI.

use crate::domain::ports::{LinkEvent, LinkEventSink, TreeEvent, TreeEventSink};

/// Event sink that logs every event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TreeEventSink for TracingEventSink {
    fn on_tree_event(&self, event: &TreeEvent) {
        match event {
            TreeEvent::StructureChanged { instance, path } => {
                tracing::debug!(
                    %instance,
                    path = ?path.as_ref().map(|p| p.display().to_string()),
                    "structure changed"
                );
            }
            TreeEvent::SelectionChanged { instance, path } => {
                tracing::debug!(%instance, %path, "selection changed");
            }
        }
    }
}

impl LinkEventSink for TracingEventSink {
    fn on_link_event(&self, event: &LinkEvent) {
        match event {
            LinkEvent::LinksChanged { groups } => {
                tracing::debug!(groups = groups.len(), "links changed");
            }
        }
    }
}
