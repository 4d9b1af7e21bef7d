//! JSON file directory store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use orgtree_domain::{DirectoryStore, DomainResult, Position, PositionId, PositionPatch};

use super::write_atomically;
use crate::error::PersistenceError;

/// Directory stored as a JSON array of positions
///
/// Concurrent updates are serialized through an internal lock so that each
/// read-modify-write of the document sees the previous one.
#[derive(Debug)]
pub struct JsonDirectoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirectoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Vec<Position>, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "Directory file missing, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole document
    pub async fn write_all(&self, positions: &[Position]) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        let bytes = serde_json::to_vec_pretty(positions).map_err(PersistenceError::from)?;
        write_atomically(&self.path, &bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl DirectoryStore for JsonDirectoryStore {
    async fn list_all(&self) -> DomainResult<Vec<Position>> {
        Ok(self.read_document().await?)
    }

    async fn update(&self, id: &PositionId, patch: &PositionPatch) -> DomainResult<Position> {
        let _guard = self.write_lock.lock().await;
        let mut positions = self.read_document().await?;

        let updated = {
            let position = positions
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| PersistenceError::not_found("Position", id.as_str()))?;
            position.apply_patch(patch);
            position.clone()
        };

        let bytes = serde_json::to_vec_pretty(&positions).map_err(PersistenceError::from)?;
        write_atomically(&self.path, &bytes).await?;

        tracing::debug!(position_id = %id, path = ?self.path, "Position written");
        Ok(updated)
    }
}
