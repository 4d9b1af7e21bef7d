//! Domain errors for OrgTree

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid position id: {reason}")]
    InvalidPositionId { reason: String },

    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Update rejected for {id}: {reason}")]
    UpdateRejected { id: String, reason: String },

    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },
}

impl DomainError {
    /// Create an EntityNotFound error for a position
    pub fn position_not_found(id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_type: "Position".to_string(),
            id: id.into(),
        }
    }

    /// Create an UpdateRejected error
    pub fn update_rejected(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpdateRejected {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
