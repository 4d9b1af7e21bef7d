#![warn(missing_docs)]

//! Undo/Redo history for OrgTree reorganization sessions
//!
//! Two plain stacks of [`MoveAction`]s with standard linear-history semantics:
//! recording a new move invalidates everything that could have been redone.

pub mod error;
pub mod history;
pub mod models;

// Re-export public API
pub use error::HistoryError;
pub use history::MoveHistory;
pub use models::MoveAction;
