//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `SelectionNode` - a tri-state node in a folder tree
//! - `RootCollection` - the zero-or-one root forest an instance exposes
//! - `Overlay` - sparse selection/expansion deviations, for persistence
//! - `LinkGroups` - membership and leadership of linked instances

mod link_groups;
mod overlay;
mod root_collection;
mod selection_node;

pub use link_groups::{GroupId, LinkGroup, LinkGroups, LinkOutcome, LinkState, UnlinkOutcome};
pub use overlay::{NodeOverlay, Overlay, BASELINE_EXPANDED, BASELINE_STATE};
pub use root_collection::{RootCollection, SharedRoots};
pub use selection_node::{NodeKind, SelectionNode, Subtree};
