//! Link Module
//!
//! Keeps groups of tree instances mirroring one shared tree.
//!
//! ## Usage
//!
//! ```ignore
//! use treelink::application::{LinkCoordinator, TreeInstance};
//!
//! let coordinator = LinkCoordinator::new();
//! coordinator.register("left", left.clone());
//! coordinator.register("right", right.clone());
//! coordinator.create_link(&"left".into(), &"right".into())?;
//! ```

mod coordinator;

pub use coordinator::LinkCoordinator;
