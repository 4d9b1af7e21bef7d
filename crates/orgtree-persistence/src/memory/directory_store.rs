//! In-Memory Directory Store Implementation

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use orgtree_domain::{DirectoryStore, DomainResult, Position, PositionId, PositionPatch};

use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of DirectoryStore
///
/// Positions are kept in insertion order so that `list_all` is stable.
/// Updates for ids registered with [`fail_updates_for`](Self::fail_updates_for)
/// are rejected, which lets tests exercise partial commit failures.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    positions: RwLock<Vec<Position>>,
    failing: RwLock<HashSet<PositionId>>,
    update_calls: AtomicUsize,
}

impl InMemoryDirectoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial positions
    pub fn with_positions(positions: Vec<Position>) -> Self {
        Self {
            positions: RwLock::new(positions),
            ..Self::default()
        }
    }

    /// Reject every subsequent update for `id`
    pub fn fail_updates_for(&self, id: impl Into<PositionId>) {
        self.failing.write().insert(id.into());
    }

    /// Stop rejecting updates for `id`
    pub fn clear_failure(&self, id: &PositionId) {
        self.failing.write().remove(id);
    }

    /// Number of update calls received, including rejected ones
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Current stored copy of a position
    pub fn get(&self, id: &PositionId) -> Option<Position> {
        self.positions.read().iter().find(|p| &p.id == id).cloned()
    }

    /// Replace the whole directory, e.g. to simulate an external edit
    pub fn replace_all(&self, positions: Vec<Position>) {
        *self.positions.write() = positions;
    }

    /// Get the current count of positions
    pub fn count(&self) -> usize {
        self.positions.read().len()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn list_all(&self) -> DomainResult<Vec<Position>> {
        Ok(self.positions.read().clone())
    }

    async fn update(&self, id: &PositionId, patch: &PositionPatch) -> DomainResult<Position> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().contains(id) {
            tracing::debug!(position_id = %id, "Rejecting injected update failure");
            return Err(PersistenceError::WriteRejected {
                id: id.to_string(),
                reason: "injected failure".to_string(),
            }
            .into());
        }

        let mut positions = self.positions.write();
        let position = positions
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PersistenceError::not_found("Position", id.as_str()))?;
        position.apply_patch(patch);
        Ok(position.clone())
    }
}
