//! Engine facade for the presentation layer
//!
//! Owns the session and the commit manager and talks to the directory store
//! at the two points where the tree is (re)loaded: entering edit mode and
//! after a fully successful commit.

use std::sync::Arc;

use orgtree_config::OrgTreeConfig;
use orgtree_domain::{DirectoryStore, PositionId, Role};
use orgtree_undo_redo::MoveAction;

use crate::commit::{CommitManager, CommitReport};
use crate::error::{ReorgError, Result};
use crate::geometry::Rect;
use crate::hierarchy::{HierarchyBuilder, StructuralDiagnostic};
use crate::propagation::RuleTable;
use crate::session::{DragOutcome, ReorgSession};
use crate::tree::OrgTree;

pub struct ReorgEngine {
    store: Arc<dyn DirectoryStore>,
    builder: HierarchyBuilder,
    session: ReorgSession,
    committer: CommitManager,
    diagnostics: Vec<StructuralDiagnostic>,
}

impl ReorgEngine {
    /// Read the directory and build the initial tree
    pub async fn load(store: Arc<dyn DirectoryStore>, config: &OrgTreeConfig) -> Result<Self> {
        let mut engine = Self {
            builder: HierarchyBuilder::new(config.hierarchy.clone()),
            session: ReorgSession::default(),
            committer: CommitManager::new(
                Arc::clone(&store),
                config.commit.max_concurrent_updates,
            ),
            store,
            diagnostics: Vec::new(),
        };
        engine.refresh().await?;
        Ok(engine)
    }

    /// Use a custom propagation table
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.session = std::mem::take(&mut self.session).with_rules(rules);
        self
    }

    /// Re-read the directory and rebuild the tree. Refused while editing.
    pub async fn refresh(&mut self) -> Result<()> {
        if self.session.is_editing() {
            return Err(ReorgError::SessionActive);
        }
        let positions = self.store.list_all().await?;
        self.committer.reset_baseline(&positions);
        let outcome = self.builder.build(positions);
        self.diagnostics = outcome.diagnostics;
        self.session.replace_tree(outcome.tree);
        Ok(())
    }

    /// Start a reorganization session on a fresh snapshot
    pub async fn enable_editing(&mut self) -> Result<()> {
        if self.session.is_editing() {
            return Ok(());
        }
        self.refresh().await?;
        self.session.enable();
        Ok(())
    }

    /// Leave edit mode without persisting; same as [`cancel`](Self::cancel)
    pub fn disable_editing(&mut self) -> usize {
        self.cancel()
    }

    pub fn on_drag_start(&mut self, id: &PositionId) -> bool {
        self.session.drag_start(id)
    }

    pub fn on_drag_move(&mut self, pointer: Rect) -> Option<&PositionId> {
        self.session.drag_move(pointer)
    }

    pub fn on_drag_end(&mut self, pointer: Rect) -> DragOutcome {
        self.session.drag_end(pointer)
    }

    pub fn undo(&mut self) -> Option<MoveAction> {
        self.session.undo()
    }

    pub fn redo(&mut self) -> Option<MoveAction> {
        self.session.redo()
    }

    pub fn cancel(&mut self) -> usize {
        self.session.cancel()
    }

    /// Persist the session's moves and return to view mode.
    ///
    /// On a complete commit the directory is re-read so roles reflect the
    /// stored state. After a partial failure the local tree is kept as is,
    /// so the operator can see and re-edit the diverged nodes.
    pub async fn commit(&mut self) -> Result<CommitReport> {
        if !self.session.is_editing() {
            tracing::debug!("Commit outside edit mode ignored");
            return Ok(CommitReport::empty());
        }

        let actions = self.session.finish_for_commit();
        let report = self.committer.commit(&actions, self.session.tree()).await;

        if report.is_complete() {
            if let Err(error) = self.refresh().await {
                tracing::warn!(%error, "Refresh after commit failed; keeping local tree");
            }
        } else {
            tracing::warn!(
                failed = ?report.failed_ids(),
                "Commit partially failed; local and stored state diverge"
            );
        }
        Ok(report)
    }

    pub fn role_of(&self, id: &PositionId) -> Option<Role> {
        self.session.role_of(id)
    }

    pub fn tree(&self) -> &OrgTree {
        self.session.tree()
    }

    pub fn session(&self) -> &ReorgSession {
        &self.session
    }

    /// Mutable access for the rendering layer (layout updates, drag protocol)
    pub fn session_mut(&mut self) -> &mut ReorgSession {
        &mut self.session
    }

    /// Repairs made while building the current tree
    pub fn diagnostics(&self) -> &[StructuralDiagnostic] {
        &self.diagnostics
    }
}
