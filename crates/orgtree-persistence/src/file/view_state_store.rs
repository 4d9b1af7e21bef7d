//! JSON file view-state store

use std::path::PathBuf;

use async_trait::async_trait;

use orgtree_domain::{DomainResult, ViewState, ViewStateStore};

use super::write_atomically;
use crate::error::PersistenceError;

/// View state kept as a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonViewStateStore {
    path: PathBuf,
}

impl JsonViewStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ViewStateStore for JsonViewStateStore {
    async fn load(&self) -> DomainResult<Option<ViewState>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let state = serde_json::from_slice(&bytes).map_err(PersistenceError::from)?;
                Ok(Some(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    async fn save(&self, state: &ViewState) -> DomainResult<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(PersistenceError::from)?;
        write_atomically(&self.path, &bytes).await?;
        Ok(())
    }
}
