//! Application Layer
//!
//! Orchestrates the domain for callers (views, the CLI, tests).
//! This layer:
//! - Depends on the Domain layer (entities, ports)
//! - Does NOT contain selection rules (those are in Domain)
//! - Owns the observable, shared-handle objects views hold on to
//!
//! ## Components
//!
//! - `TreeInstance` - one named tree: load, select, notify
//! - `LinkCoordinator` - link groups and change propagation across instances

pub mod link;
pub mod tree_instance;

pub use link::LinkCoordinator;
pub use tree_instance::TreeInstance;
