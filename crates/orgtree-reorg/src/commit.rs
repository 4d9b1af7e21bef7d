//! Batch commit of a session's moves to the directory store
//!
//! Every moved node yields one independent update. Updates run concurrently
//! up to a configured limit and the commit completes once all have settled.
//! A failed update neither blocks its siblings nor rolls them back; the
//! report lists exactly which nodes diverged from the store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use orgtree_domain::{DirectoryStore, DomainError, Position, PositionId, PositionPatch};
use orgtree_undo_redo::MoveAction;

use crate::tree::OrgTree;

/// A node whose update the store accepted
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedMove {
    pub action: MoveAction,
    pub patch: PositionPatch,
}

/// A node whose update failed
#[derive(Debug, Clone, PartialEq)]
pub struct CommitFailure {
    pub action: MoveAction,
    pub error: DomainError,
}

/// Outcome of one commit
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReport {
    pub succeeded: Vec<CommittedMove>,
    pub failed: Vec<CommitFailure>,
    /// Moved nodes whose final state already matched the store
    pub unchanged: Vec<PositionId>,
    pub committed_at: DateTime<Utc>,
}

impl CommitReport {
    pub fn empty() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            unchanged: Vec::new(),
            committed_at: Utc::now(),
        }
    }

    /// True when local and remote state agree for every moved node
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<&PositionId> {
        self.failed.iter().map(|f| &f.action.node_id).collect()
    }

    /// Number of update calls that were sent
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Sends moves to the store and remembers what the store last accepted
pub struct CommitManager {
    store: Arc<dyn DirectoryStore>,
    baseline: HashMap<PositionId, PositionPatch>,
    max_concurrent: usize,
}

impl CommitManager {
    pub fn new(store: Arc<dyn DirectoryStore>, max_concurrent: usize) -> Self {
        Self {
            store,
            baseline: HashMap::new(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Record the persisted state of every position, e.g. after `list_all`
    pub fn reset_baseline(&mut self, positions: &[Position]) {
        self.baseline = positions
            .iter()
            .map(|p| (p.id.clone(), PositionPatch::from_position(p)))
            .collect();
    }

    pub fn baseline_of(&self, id: &PositionId) -> Option<&PositionPatch> {
        self.baseline.get(id)
    }

    /// Persist the final in-memory state of every node touched by `actions`
    pub async fn commit(&mut self, actions: &[MoveAction], tree: &OrgTree) -> CommitReport {
        let mut report = CommitReport::empty();

        // One update per node, reported against its latest action.
        let mut order: Vec<&PositionId> = Vec::new();
        let mut latest: HashMap<&PositionId, &MoveAction> = HashMap::new();
        for action in actions {
            if latest.insert(&action.node_id, action).is_none() {
                order.push(&action.node_id);
            }
        }

        let mut jobs = Vec::new();
        for id in order {
            let action = latest[id].clone();
            let Some(position) = tree.get(id) else {
                report.failed.push(CommitFailure {
                    action,
                    error: DomainError::position_not_found(id.as_str()),
                });
                continue;
            };
            let patch = PositionPatch::from_position(position);
            if self.baseline.get(id) == Some(&patch) {
                report.unchanged.push(id.clone());
                continue;
            }
            jobs.push((jobs.len(), action, patch));
        }

        let store = Arc::clone(&self.store);
        let mut results: Vec<_> = stream::iter(jobs)
            .map(|(seq, action, patch)| {
                let store = Arc::clone(&store);
                async move {
                    let result = store.update(&action.node_id, &patch).await;
                    (seq, action, patch, result)
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;
        results.sort_by_key(|(seq, ..)| *seq);

        for (_, action, patch, result) in results {
            match result {
                Ok(_) => {
                    self.baseline.insert(action.node_id.clone(), patch.clone());
                    report.succeeded.push(CommittedMove { action, patch });
                }
                Err(error) => {
                    tracing::warn!(node_id = %action.node_id, %error, "Position update failed");
                    report.failed.push(CommitFailure { action, error });
                }
            }
        }

        report.committed_at = Utc::now();
        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            unchanged = report.unchanged.len(),
            "Commit finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyBuilder;
    use crate::session::ReorgSession;
    use orgtree_domain::Assignment;
    use orgtree_persistence::InMemoryDirectoryStore;

    fn directory() -> Vec<Position> {
        let eng = Assignment::department("ENG", "Engineering");
        vec![
            Position::new("ceo", "Chief").with_title("CEO"),
            Position::new("eng", "Head")
                .with_manager("ceo")
                .department_head()
                .with_assignment(eng.clone()),
            Position::new("lead", "Lead")
                .with_manager("eng")
                .with_assignment(eng.clone().with_team("A", "Alpha")),
            Position::new("a", "A")
                .with_manager("lead")
                .with_assignment(eng.clone().with_team("A", "Alpha")),
            Position::new("b", "B")
                .with_manager("lead")
                .with_assignment(eng.clone().with_team("A", "Alpha")),
            Position::new("c", "C")
                .with_manager("lead")
                .with_assignment(eng.with_team("A", "Alpha")),
        ]
    }

    fn setup() -> (Arc<InMemoryDirectoryStore>, CommitManager, ReorgSession) {
        let store = Arc::new(InMemoryDirectoryStore::with_positions(directory()));
        let mut manager = CommitManager::new(store.clone(), 4);
        manager.reset_baseline(&directory());
        let session = ReorgSession::new(HierarchyBuilder::default().build(directory()).tree);
        (store, manager, session)
    }

    #[tokio::test]
    async fn test_partial_failure_reports_each_node() {
        let (store, mut manager, mut session) = setup();
        store.fail_updates_for("b");

        session.enable();
        for id in ["a", "b", "c"] {
            session.move_node(&id.into(), &"eng".into()).unwrap();
        }
        let actions = session.finish_for_commit();
        let report = manager.commit(&actions, session.tree()).await;

        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed_ids(), vec![&PositionId::from("b")]);
        assert!(!report.is_complete());

        for committed in &report.succeeded {
            let local = session.tree().get(&committed.action.node_id).unwrap();
            let remote = store.get(&committed.action.node_id).unwrap();
            assert_eq!(PositionPatch::from_position(local), committed.patch);
            assert_eq!(PositionPatch::from_position(&remote), committed.patch);
        }
        // The failed node stays diverged: moved locally, untouched remotely.
        assert_eq!(
            store.get(&"b".into()).unwrap().manager_id,
            Some(PositionId::from("lead"))
        );
        assert_eq!(
            session.tree().parent_of(&"b".into()),
            Some(&PositionId::from("eng"))
        );
    }

    #[tokio::test]
    async fn test_recommit_sends_nothing() {
        let (store, mut manager, mut session) = setup();
        session.enable();
        session.move_node(&"a".into(), &"eng".into()).unwrap();
        let actions = session.finish_for_commit();

        let first = manager.commit(&actions, session.tree()).await;
        assert_eq!(first.attempted(), 1);
        assert_eq!(store.update_calls(), 1);

        let second = manager.commit(&actions, session.tree()).await;
        assert_eq!(second.attempted(), 0);
        assert_eq!(second.unchanged, vec![PositionId::from("a")]);
        assert_eq!(store.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_move_and_move_back_is_skipped() {
        let (store, mut manager, mut session) = setup();
        session.enable();
        session.move_node(&"lead".into(), &"ceo".into()).unwrap();
        session.move_node(&"lead".into(), &"eng".into()).unwrap();
        let actions = session.finish_for_commit();
        assert_eq!(actions.len(), 2);

        let report = manager.commit(&actions, session.tree()).await;
        // lead under ceo matches no rule, so the round trip restores it exactly.
        assert_eq!(report.unchanged, vec![PositionId::from("lead")]);
        assert_eq!(store.update_calls(), 0);
    }

    #[tokio::test]
    async fn test_one_update_per_node() {
        let (store, mut manager, mut session) = setup();
        session.enable();
        session.move_node(&"a".into(), &"eng".into()).unwrap();
        session.move_node(&"a".into(), &"ceo".into()).unwrap();
        let actions = session.finish_for_commit();

        let report = manager.commit(&actions, session.tree()).await;
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.succeeded[0].action, actions[1]);
        assert_eq!(store.update_calls(), 1);
        assert_eq!(
            store.get(&"a".into()).unwrap().manager_id,
            Some(PositionId::from("ceo"))
        );
    }

    #[tokio::test]
    async fn test_empty_commit() {
        let (store, mut manager, session) = setup();
        let report = manager.commit(&[], session.tree()).await;
        assert!(report.is_complete());
        assert_eq!(report.attempted(), 0);
        assert_eq!(store.update_calls(), 0);
    }
}
