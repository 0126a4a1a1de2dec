//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod tree_events;
pub mod tree_source;

pub use tree_events::{
    LinkEvent, LinkEventSink, NoopEventSink, SubscriptionId, TreeEvent, TreeEventSink,
};
pub use tree_source::TreeSource;
