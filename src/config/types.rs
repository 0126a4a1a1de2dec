//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{IgnoredNames, InstanceId, DEFAULT_IGNORED_NAMES};
use crate::error::TreeLinkResult;

use super::loader::{self, ConfigWarning};

/// Tree building configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Directory names pruned while building a tree
    #[serde(default = "default_ignored_names")]
    pub ignored_names: Vec<String>,

    /// Show regular files as leaves
    #[serde(default = "default_true")]
    pub include_files: bool,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            ignored_names: default_ignored_names(),
            include_files: true,
            follow_links: false,
        }
    }
}

impl TreeConfig {
    pub fn ignored_names(&self) -> IgnoredNames {
        IgnoredNames::new(self.ignored_names.iter().map(String::as_str))
    }
}

fn default_ignored_names() -> Vec<String> {
    DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

/// One saved tree view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub id: InstanceId,
    pub path: PathBuf,
}

/// Saved session: the views and how they are linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub views: Vec<ViewConfig>,

    /// Link groups as ordered lists of view ids, leader first
    #[serde(default)]
    pub groups: Vec<Vec<InstanceId>>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TreeLinkResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> TreeLinkResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (TREELINK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
