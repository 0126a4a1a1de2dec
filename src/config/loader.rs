//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TreeLinkError, TreeLinkResult};

use super::types::Config;
use super::PROJECT_CONFIG_FILE;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> TreeLinkResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TreeLinkError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let user_config = dirs::config_dir().map(|d| d.join("treelink").join("config.toml"));
    let config = load_first(project_root, user_config.as_deref());
    with_env_overrides(config)
}

fn load_first(project_root: Option<&Path>, user_config: Option<&Path>) -> Config {
    let project_config = project_root.map(|root| root.join(PROJECT_CONFIG_FILE));
    for candidate in [project_config.as_deref(), user_config].into_iter().flatten() {
        if !candidate.exists() {
            continue;
        }
        match Config::load(candidate) {
            Ok(config) => {
                tracing::debug!(path = %candidate.display(), "loaded configuration");
                return config;
            }
            Err(err) => {
                tracing::warn!(path = %candidate.display(), error = %err, "ignoring unreadable configuration");
            }
        }
    }
    Config::default()
}

/// Apply environment variable overrides (TREELINK_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // TREELINK_IGNORE (comma-separated, replaces the list)
    if let Some(names) = get_env("TREELINK_IGNORE") {
        config.tree.ignored_names = names
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    // TREELINK_INCLUDE_FILES
    if let Some(val) = get_env("TREELINK_INCLUDE_FILES") {
        config.tree.include_files = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tree",
        "ignored_names",
        "include_files",
        "follow_links",
        "session",
        "views",
        "groups",
        "id",
        "path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let b_bytes = b.as_bytes();
    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
