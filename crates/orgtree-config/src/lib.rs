//! OrgTree Configuration Management
//!
//! Loads engine settings from an optional TOML file overlaid with `ORGTREE_*`
//! environment variables, and validates them before use.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{CommitConfig, HierarchyConfig, LoggingConfig, OrgTreeConfig, StorageConfig};
