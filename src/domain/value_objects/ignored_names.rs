//! Ignored directory names value object
//!
//! Directory names (not paths, not globs) that a tree source prunes while
//! building a tree. Matching is exact and case-sensitive.

use std::collections::BTreeSet;
use std::ffi::OsStr;

/// Names skipped when no configuration says otherwise
pub const DEFAULT_IGNORED_NAMES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "bin",
    "obj",
    ".vs",
    ".idea",
];

/// Set of directory names to skip during tree building
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoredNames {
    names: BTreeSet<String>,
}

impl IgnoredNames {
    /// A set that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .map(|n: String| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Check whether an entry with this file name should be pruned.
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|n| self.names.contains(n))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
