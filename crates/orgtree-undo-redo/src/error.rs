//! Error types for the undo/redo history

use thiserror::Error;

/// Errors that can occur while stepping through history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// No more undos available
    #[error("No more undos available")]
    NoMoreUndos,

    /// No more redos available
    #[error("No more redos available")]
    NoMoreRedos,

    /// The action referenced a node that is no longer present; it was dropped
    #[error("Move target no longer present: {0}")]
    TargetMissing(String),
}

impl HistoryError {
    /// Create a TargetMissing error with context
    pub fn target_missing(id: impl Into<String>) -> Self {
        Self::TargetMissing(id.into())
    }
}
