//! Error types for the reorganization engine

use orgtree_domain::DomainError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ReorgError>;

/// Errors surfaced by the engine.
///
/// Structural anomalies and invalid gestures are never errors; only store
/// access and misuse of the session lifecycle are.
#[derive(Debug, Error)]
pub enum ReorgError {
    #[error("Store error: {0}")]
    Store(#[from] DomainError),

    #[error("A reorganization session is active; commit or cancel it first")]
    SessionActive,
}
