//! OrgTree domain layer
//!
//! Entities, value objects and store interfaces shared by the hierarchy engine
//! and its infrastructure adapters. The domain layer defines only interfaces
//! (traits) for persistence; implementations live in `orgtree-persistence`.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{Position, PositionPatch, Role};
pub use errors::{DomainError, DomainResult};
pub use repositories::{DirectoryStore, ViewState, ViewStateStore};
pub use value_objects::{Assignment, PositionId};
