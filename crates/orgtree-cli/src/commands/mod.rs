// Command handlers for the orgtree CLI

pub mod move_cmd;
pub mod role;
pub mod toggle;
pub mod tree;

pub use move_cmd::{MoveCommand, MoveSummary};
pub use role::RoleCommand;
pub use toggle::ToggleCommand;
pub use tree::TreeCommand;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use orgtree_config::OrgTreeConfig;
use orgtree_persistence::{JsonDirectoryStore, JsonViewStateStore};
use orgtree_reorg::{ReorgEngine, ViewStateCache};

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command, printing its output
    async fn execute(&self, context: &CommandContext) -> CliResult<()>;
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: OrgTreeConfig,
    directory_path: PathBuf,
    view_state_path: PathBuf,
}

impl CommandContext {
    /// `directory` overrides `storage.directory_path` from the config
    pub fn new(config: OrgTreeConfig, directory: Option<PathBuf>) -> Self {
        let directory_path = directory.unwrap_or_else(|| config.storage.directory_path.clone());
        let view_state_path = config.storage.view_state_path.clone();
        Self {
            config,
            directory_path,
            view_state_path,
        }
    }

    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    pub fn view_state_path(&self) -> &Path {
        &self.view_state_path
    }

    /// Restore the expand/collapse state saved at `storage.view_state_path`
    pub async fn open_view_state(&self) -> CliResult<ViewStateCache> {
        let store = Arc::new(JsonViewStateStore::new(&self.view_state_path));
        let mut cache = ViewStateCache::new(store);
        cache.restore().await?;
        Ok(cache)
    }

    /// Build an engine over the JSON directory file
    pub async fn open_engine(&self) -> CliResult<ReorgEngine> {
        tracing::debug!(path = ?self.directory_path, "Opening directory");
        let store = Arc::new(JsonDirectoryStore::new(&self.directory_path));
        Ok(ReorgEngine::load(store, &self.config).await?)
    }
}
