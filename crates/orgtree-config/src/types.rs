//! Core configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OrgTreeConfig {
    /// Hierarchy construction settings
    pub hierarchy: HierarchyConfig,
    /// Commit settings
    pub commit: CommitConfig,
    /// Store locations
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Settings used while turning the flat directory into a tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Titles that mark the top executive when several roots compete.
    /// Matched case-insensitively against the whole trimmed title.
    pub top_executive_titles: Vec<String>,
}

/// Settings for persisting a session's moves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommitConfig {
    /// Upper bound on directory updates in flight at once
    pub max_concurrent_updates: usize,
}

/// Locations of the JSON documents used by the CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub directory_path: PathBuf,
    pub view_state_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `orgtree_reorg=debug`
    pub level: String,
}

impl HierarchyConfig {
    /// Whether `title` names the top executive
    pub fn is_top_executive_title(&self, title: &str) -> bool {
        let title = title.trim();
        !title.is_empty()
            && self
                .top_executive_titles
                .iter()
                .any(|t| t.trim().eq_ignore_ascii_case(title))
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            top_executive_titles: vec![
                "CEO".to_string(),
                "Chief Executive Officer".to_string(),
                "President".to_string(),
            ],
        }
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_concurrent_updates: 8,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory_path: PathBuf::from("directory.json"),
            view_state_path: PathBuf::from("view-state.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
