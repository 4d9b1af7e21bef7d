//! Expand/collapse and viewport cache
//!
//! Independent of edit sessions: toggling a subtree or panning the chart
//! never touches the tree or the undo history.

use std::sync::Arc;

use orgtree_domain::{DomainResult, PositionId, ViewState, ViewStateStore};

use crate::tree::OrgTree;

pub struct ViewStateCache {
    store: Arc<dyn ViewStateStore>,
    state: ViewState,
    dirty: bool,
}

impl ViewStateCache {
    pub fn new(store: Arc<dyn ViewStateStore>) -> Self {
        Self {
            store,
            state: ViewState::default(),
            dirty: false,
        }
    }

    /// Load the saved state, keeping the current one when nothing was saved
    pub async fn restore(&mut self) -> DomainResult<()> {
        if let Some(state) = self.store.load().await? {
            tracing::debug!(entries = state.expanded.len(), "View state restored");
            self.state = state;
            self.dirty = false;
        }
        Ok(())
    }

    /// Write the state back if it changed since the last restore or persist
    pub async fn persist(&mut self) -> DomainResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.store.save(&self.state).await?;
        self.dirty = false;
        Ok(true)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Nodes are expanded unless explicitly collapsed
    pub fn is_expanded(&self, id: &PositionId) -> bool {
        self.state.expanded.get(id).copied().unwrap_or(true)
    }

    pub fn set_expanded(&mut self, id: PositionId, expanded: bool) {
        if self.state.expanded.insert(id, expanded) != Some(expanded) {
            self.dirty = true;
        }
    }

    /// Flip a node and return its new state
    pub fn toggle(&mut self, id: &PositionId) -> bool {
        let next = !self.is_expanded(id);
        self.set_expanded(id.clone(), next);
        next
    }

    pub fn transform(&self) -> &str {
        &self.state.transform
    }

    pub fn set_transform(&mut self, transform: impl Into<String>) {
        let transform = transform.into();
        if self.state.transform != transform {
            self.state.transform = transform;
            self.dirty = true;
        }
    }

    /// Drop entries for positions that are no longer in the tree
    pub fn prune(&mut self, tree: &OrgTree) -> usize {
        let before = self.state.expanded.len();
        self.state.expanded.retain(|id, _| tree.contains(id));
        let removed = before - self.state.expanded.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyBuilder;
    use orgtree_domain::Position;
    use orgtree_persistence::InMemoryViewStateStore;

    #[tokio::test]
    async fn test_toggle_persist_restore() {
        let store = Arc::new(InMemoryViewStateStore::new());
        let mut cache = ViewStateCache::new(store.clone());

        assert!(cache.is_expanded(&"eng".into()));
        assert!(!cache.toggle(&"eng".into()));
        cache.set_transform("translate(4,2) scale(1.2)");
        assert!(cache.persist().await.unwrap());
        assert!(!cache.persist().await.unwrap());

        let mut reopened = ViewStateCache::new(store);
        reopened.restore().await.unwrap();
        assert!(!reopened.is_expanded(&"eng".into()));
        assert_eq!(reopened.transform(), "translate(4,2) scale(1.2)");
        assert!(!reopened.is_dirty());
    }

    #[tokio::test]
    async fn test_restore_without_saved_state() {
        let mut cache = ViewStateCache::new(Arc::new(InMemoryViewStateStore::new()));
        cache.set_expanded("a".into(), false);
        cache.restore().await.unwrap();
        assert!(!cache.is_expanded(&"a".into()));
        assert!(cache.is_dirty());
    }

    #[test]
    fn test_setting_same_value_is_clean() {
        let mut cache = ViewStateCache::new(Arc::new(InMemoryViewStateStore::new()));
        cache.set_transform("");
        assert!(!cache.is_dirty());
        cache.set_expanded("a".into(), true);
        assert!(cache.is_dirty());
    }

    #[test]
    fn test_prune_removes_vanished_positions() {
        let tree = HierarchyBuilder::default()
            .build(vec![Position::new("ceo", "Root")])
            .tree;
        let mut cache = ViewStateCache::new(Arc::new(InMemoryViewStateStore::new()));
        cache.set_expanded("ceo".into(), false);
        cache.set_expanded("gone".into(), false);
        assert_eq!(cache.prune(&tree), 1);
        assert!(!cache.is_expanded(&"ceo".into()));
    }
}
