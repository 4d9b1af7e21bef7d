//! OrgTree Persistence Layer
//!
//! Infrastructure layer providing store implementations for the interfaces
//! defined in `orgtree-domain`.
//!
//! ## Features
//!
//! - **In-Memory Stores**: Thread-safe in-memory implementations with failure
//!   injection for testing and development
//! - **JSON File Stores**: Whole-document JSON files on local disk
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                    │  file/                             │
//! │  InMemoryDirectoryStore     │  JsonDirectoryStore                │
//! │  InMemoryViewStateStore     │  JsonViewStateStore                │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │              DirectoryStore, ViewStateStore                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use orgtree_persistence::InMemoryDirectoryStore;
//! use orgtree_domain::DirectoryStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn DirectoryStore> = Arc::new(InMemoryDirectoryStore::with_positions(positions));
//! ```

pub mod error;
#[cfg(feature = "json-file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;

pub use error::PersistenceError;

#[cfg(feature = "json-file")]
pub use file::{JsonDirectoryStore, JsonViewStateStore};
#[cfg(feature = "memory")]
pub use memory::{InMemoryDirectoryStore, InMemoryViewStateStore};
