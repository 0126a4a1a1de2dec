//! treelink - tri-state folder tree selection with linked views
//!
//! Browse one or more folder trees, select arbitrary subsets of nodes with
//! automatic tri-state parent inference, and link tree instances so that they
//! share one structure and selection state.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{LinkCoordinator, TreeInstance};
pub use config::Config;
pub use domain::entities::{
    LinkState, NodeKind, NodeOverlay, Overlay, RootCollection, SelectionNode, SharedRoots,
};
pub use domain::ports::{LinkEvent, LinkEventSink, TreeEvent, TreeEventSink, TreeSource};
pub use domain::value_objects::{IgnoredNames, InstanceId, SelectionState};
pub use error::{TreeLinkError, TreeLinkResult};
pub use infrastructure::{FsTreeSource, InMemoryTreeSource};
