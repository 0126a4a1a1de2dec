//! Tree Source Implementations
//!
//! Concrete implementations of the TreeSource port:
//! - FsTreeSource: walks a local directory
//! - InMemoryTreeSource: prebuilt trees keyed by root path

mod fs;
mod memory;

pub use fs::FsTreeSource;
pub use memory::InMemoryTreeSource;
