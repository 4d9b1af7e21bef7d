//! In-Memory View-State Store Implementation

use async_trait::async_trait;
use parking_lot::RwLock;

use orgtree_domain::{DomainResult, ViewState, ViewStateStore};

/// Keeps the last saved view state in memory
#[derive(Debug, Default)]
pub struct InMemoryViewStateStore {
    state: RwLock<Option<ViewState>>,
}

impl InMemoryViewStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewStateStore for InMemoryViewStateStore {
    async fn load(&self) -> DomainResult<Option<ViewState>> {
        Ok(self.state.read().clone())
    }

    async fn save(&self, state: &ViewState) -> DomainResult<()> {
        *self.state.write() = Some(state.clone());
        Ok(())
    }
}
