//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `tree_source/` - Tree builders (local file system, in-memory)
//! - `events/` - Event sinks (NDJSON, tracing)

pub mod events;
pub mod tree_source;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use tree_source::{FsTreeSource, InMemoryTreeSource};
