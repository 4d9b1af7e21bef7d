//! In-Memory Store Implementations
//!
//! Thread-safe in-memory implementations of the domain store interfaces.
//! Suitable for testing and development.

mod directory_store;
mod view_state_store;

pub use directory_store::InMemoryDirectoryStore;
pub use view_state_store::InMemoryViewStateStore;
