//! Store interfaces for data persistence
//!
//! The hierarchy engine consumes these contracts; infrastructure crates
//! provide the implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Position, PositionPatch},
    errors::DomainResult,
    value_objects::PositionId,
};

/// Authoritative store of positions
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Full snapshot of every position
    async fn list_all(&self) -> DomainResult<Vec<Position>>;

    /// Update one position. Sending a patch identical to the stored state is allowed.
    async fn update(&self, id: &PositionId, patch: &PositionPatch) -> DomainResult<Position>;
}

/// Expand/collapse flags and viewport transform of the chart view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    #[serde(default)]
    pub expanded: BTreeMap<PositionId, bool>,
    #[serde(default)]
    pub transform: String,
}

/// Store for the opaque view-state blob, read and written wholesale
#[async_trait]
pub trait ViewStateStore: Send + Sync {
    /// Load the saved view state, if any was saved
    async fn load(&self) -> DomainResult<Option<ViewState>>;

    /// Replace the saved view state
    async fn save(&self, state: &ViewState) -> DomainResult<()>;
}
