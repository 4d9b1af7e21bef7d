//! JSON file store implementations
//!
//! Each store owns one JSON document on disk and rewrites it wholesale on
//! every write. Writes go to a sibling temp file first and are renamed into
//! place.

mod directory_store;
mod view_state_store;

use std::path::Path;

use crate::error::PersistenceError;

pub use directory_store::JsonDirectoryStore;
pub use view_state_store::JsonViewStateStore;

async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
