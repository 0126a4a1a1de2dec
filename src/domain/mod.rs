//! Domain Layer
//!
//! The selection model without I/O: tri-state nodes, root collections,
//! overlays and link-group bookkeeping.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (SelectionNode, RootCollection, Overlay, LinkGroups)
//! - `value_objects/` - Immutable value types (SelectionState, InstanceId, IgnoredNames)
//! - `ports/` - Interface definitions for infrastructure (TreeSource, event sinks)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Single-threaded** - Shared state uses `Rc`/`RefCell`, never locks
//! 3. **Ports & Adapters** - Tree building and event delivery go through traits

pub mod entities;
pub mod ports;
pub mod value_objects;
