//! Configuration module for treelink
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TREELINK_*)
//! 3. Project config (.treelink.toml)
//! 4. User config (<config dir>/treelink/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, with_env_overrides, ConfigWarning};
pub use types::{Config, SessionConfig, TreeConfig, ViewConfig};

/// File name of the project-level configuration
pub const PROJECT_CONFIG_FILE: &str = ".treelink.toml";
