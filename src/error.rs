//! Error types for treelink
//!
//! Uses `thiserror` for library errors. Input and access problems (empty load
//! paths, unreadable directories, direct root deselection) are not errors; they
//! are absorbed where they happen. What remains here are caller mistakes and
//! configuration/IO failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::InstanceId;

/// Result type alias for treelink operations
pub type TreeLinkResult<T> = Result<T, TreeLinkError>;

/// Main error type for treelink operations
#[derive(Error, Debug)]
pub enum TreeLinkError {
    /// The coordinator was asked about an id nobody registered
    #[error("tree instance '{id}' is not registered with the link coordinator")]
    UnknownInstance { id: InstanceId },

    /// A node path that does not exist in the current tree
    #[error("no node with path '{path}' in the current tree")]
    NodeNotFound { path: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (overlay / event) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
