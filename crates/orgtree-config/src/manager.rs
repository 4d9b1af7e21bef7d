//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::{
    error::{ConfigError, Result},
    types::OrgTreeConfig,
};

/// Loads, validates and saves [`OrgTreeConfig`]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: "ORGTREE".to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: "ORGTREE".to_string(),
        }
    }

    /// Override the environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orgtree")
            .join("config.toml")
    }

    /// Load the file (if present) and environment overrides, then validate.
    ///
    /// Nested keys are addressed with a double underscore, e.g.
    /// `ORGTREE_COMMIT__MAX_CONCURRENT_UPDATES=4`.
    pub fn load(&self) -> Result<OrgTreeConfig> {
        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: OrgTreeConfig = builder.build()?.try_deserialize()?;
        self.validate(&config)?;

        tracing::debug!(path = ?self.config_path, "Configuration loaded");
        Ok(config)
    }

    /// Write the configuration as TOML
    pub fn save(&self, config: &OrgTreeConfig) -> Result<()> {
        self.validate(config)?;
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self, config: &OrgTreeConfig) -> Result<()> {
        if config.commit.max_concurrent_updates == 0 {
            return Err(ConfigError::Validation(
                "commit.max_concurrent_updates must be greater than 0".to_string(),
            ));
        }
        if config
            .hierarchy
            .top_executive_titles
            .iter()
            .all(|t| t.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "hierarchy.top_executive_titles must name at least one title".to_string(),
            ));
        }
        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
