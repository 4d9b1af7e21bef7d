//! Reorganization session state machine
//!
//! ```text
//!          enable()                 commit / cancel
//!   View ───────────▶ Editing ───────────────────────▶ View
//!                       │  drag_start ─▶ drag_move* ─▶ drag_end
//!                       │  undo / redo
//! ```
//!
//! The session exclusively owns the in-memory tree while editing. Gestures
//! that make no sense (dragging the root, dropping on nothing, on the current
//! parent, on itself or on one of its own reports) are silent no-ops: the
//! renderer is told to put the card back and nothing else changes.
//!
//! The presentation layer holds a `&mut ReorgSession` and calls the drag
//! protocol on it directly.

use std::collections::HashMap;

use orgtree_domain::{PositionId, Role};
use orgtree_undo_redo::{HistoryError, MoveAction, MoveHistory};

use crate::geometry::Rect;
use crate::propagation::RuleTable;
use crate::roles;
use crate::tree::OrgTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    View,
    Editing,
}

/// The gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub node_id: PositionId,
    /// Bounds before the drag started, used to snap the card back
    pub origin: Option<Rect>,
    pub drop_candidate: Option<PositionId>,
}

/// What the renderer should do once a gesture ends
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// No gesture was in progress
    Ignored,
    /// The gesture was rejected; return the card to `origin`
    Reset {
        node_id: PositionId,
        origin: Option<Rect>,
    },
    /// The move was applied and recorded
    Moved {
        action: MoveAction,
        new_parent_id: PositionId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ReorgSession {
    tree: OrgTree,
    mode: SessionMode,
    drag: Option<DragState>,
    history: MoveHistory,
    rules: RuleTable,
    layout: HashMap<PositionId, Rect>,
}

impl ReorgSession {
    pub fn new(tree: OrgTree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == SessionMode::Editing
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn drop_candidate(&self) -> Option<&PositionId> {
        self.drag.as_ref().and_then(|d| d.drop_candidate.as_ref())
    }

    pub fn role_of(&self, id: &PositionId) -> Option<Role> {
        roles::classify(&self.tree, id)
    }

    /// Swap in a freshly built tree. Refused while editing.
    pub fn replace_tree(&mut self, tree: OrgTree) -> bool {
        if self.is_editing() {
            return false;
        }
        self.layout.retain(|id, _| tree.contains(id));
        self.tree = tree;
        true
    }

    /// Enter edit mode with empty history
    pub fn enable(&mut self) {
        if self.is_editing() {
            return;
        }
        self.history.clear();
        self.drag = None;
        self.mode = SessionMode::Editing;
        tracing::info!(positions = self.tree.len(), "Reorganization session started");
    }

    /// Replace the on-screen bounds of every rendered card
    pub fn update_layout(&mut self, layout: HashMap<PositionId, Rect>) {
        self.layout = layout;
    }

    pub fn set_node_bounds(&mut self, id: PositionId, bounds: Rect) {
        self.layout.insert(id, bounds);
    }

    /// Begin dragging `id`. Returns whether the drag was accepted.
    pub fn drag_start(&mut self, id: &PositionId) -> bool {
        if !self.is_editing() || !self.tree.contains(id) {
            tracing::debug!(node_id = %id, "Drag start ignored");
            return false;
        }
        if self.tree.is_root(id) {
            tracing::debug!(node_id = %id, "Root is not draggable");
            return false;
        }
        self.drag = Some(DragState {
            node_id: id.clone(),
            origin: self.layout.get(id).copied(),
            drop_candidate: None,
        });
        true
    }

    /// Recompute the drop candidate for the dragged card's current bounds
    pub fn drag_move(&mut self, pointer: Rect) -> Option<&PositionId> {
        let dragged = self.drag.as_ref()?.node_id.clone();
        let candidate = self.hit_test(pointer, &dragged);
        let drag = self.drag.as_mut()?;
        drag.drop_candidate = candidate;
        drag.drop_candidate.as_ref()
    }

    /// Finish the gesture, applying the move when it is valid
    pub fn drag_end(&mut self, pointer: Rect) -> DragOutcome {
        let Some(drag) = self.drag.take() else {
            return DragOutcome::Ignored;
        };

        let reset = DragOutcome::Reset {
            node_id: drag.node_id.clone(),
            origin: drag.origin,
        };
        let Some(target) = self.hit_test(pointer, &drag.node_id) else {
            tracing::debug!(node_id = %drag.node_id, "Dropped outside any node");
            return reset;
        };

        match self.move_node(&drag.node_id, &target) {
            Some(action) => DragOutcome::Moved {
                action,
                new_parent_id: target,
            },
            None => reset,
        }
    }

    /// Reparent `id` under `target` with the same validation and propagation
    /// as a drop. Returns the recorded action, or `None` for a no-op.
    pub fn move_node(&mut self, id: &PositionId, target: &PositionId) -> Option<MoveAction> {
        if let Err(reason) = self.validate_move(id, target) {
            tracing::debug!(node_id = %id, target_id = %target, reason, "Move ignored");
            return None;
        }

        let mover_role = self.role_of(id)?;
        let target_role = self.role_of(target)?;
        let mover = self.tree.get(id)?.assignment();
        let next = self
            .rules
            .propagate(mover_role, &mover, target_role, &self.tree.get(target)?.assignment());

        let action = MoveAction::new(id.clone(), self.tree.parent_of(id).cloned(), mover);
        self.tree.set_parent(id, Some(target));
        self.tree.set_assignment(id, next);
        self.history.record(action.clone());

        tracing::info!(
            node_id = %id,
            new_parent_id = %target,
            ?mover_role,
            ?target_role,
            "Position moved"
        );
        Some(action)
    }

    fn validate_move(&self, id: &PositionId, target: &PositionId) -> Result<(), &'static str> {
        if !self.is_editing() {
            return Err("not editing");
        }
        if !self.tree.contains(id) || !self.tree.contains(target) {
            return Err("unknown node");
        }
        if id == target {
            return Err("dropped on itself");
        }
        if self.tree.is_root(id) {
            return Err("root is not movable");
        }
        if self.tree.parent_of(id) == Some(target) {
            return Err("already reports to target");
        }
        if self.tree.is_descendant_of(target, id) {
            return Err("target reports to the mover");
        }
        Ok(())
    }

    /// First laid-out node, other than `exclude`, containing the pointer's midpoint
    fn hit_test(&self, pointer: Rect, exclude: &PositionId) -> Option<PositionId> {
        let midpoint = pointer.center();
        self.tree
            .positions()
            .filter(|p| &p.id != exclude)
            .find(|p| {
                self.layout
                    .get(&p.id)
                    .map(|bounds| bounds.contains(midpoint))
                    .unwrap_or(false)
            })
            .map(|p| p.id.clone())
    }

    /// Revert the most recent move. `None` when there was nothing to undo or
    /// the entry referred to a node that no longer exists.
    pub fn undo(&mut self) -> Option<MoveAction> {
        if !self.is_editing() {
            return None;
        }
        let tree = &mut self.tree;
        log_step(self.history.undo(|action| apply_action(tree, action)))
    }

    /// Re-apply the most recently undone move
    pub fn redo(&mut self) -> Option<MoveAction> {
        if !self.is_editing() {
            return None;
        }
        let tree = &mut self.tree;
        log_step(self.history.redo(|action| apply_action(tree, action)))
    }

    /// Revert every move of the session and return to view mode.
    ///
    /// Returns the number of moves reverted. Nothing is persisted.
    pub fn cancel(&mut self) -> usize {
        if !self.is_editing() {
            return 0;
        }
        let mut reverted = 0;
        for action in self.history.drain_for_revert() {
            if apply_action(&mut self.tree, &action).is_some() {
                reverted += 1;
            } else {
                tracing::warn!(node_id = %action.node_id, "Skipping revert of missing node");
            }
        }
        self.drag = None;
        self.mode = SessionMode::View;
        tracing::info!(reverted, "Reorganization session cancelled");
        reverted
    }

    /// Hand over the session's moves, oldest first, and return to view mode
    pub fn finish_for_commit(&mut self) -> Vec<MoveAction> {
        if !self.is_editing() {
            return Vec::new();
        }
        self.drag = None;
        self.mode = SessionMode::View;
        self.history.take_all()
    }
}

/// Apply `action` to the tree and return the action that undoes it
fn apply_action(tree: &mut OrgTree, action: &MoveAction) -> Option<MoveAction> {
    let current = tree.get(&action.node_id)?;
    let inverse = MoveAction::new(
        action.node_id.clone(),
        tree.parent_of(&action.node_id).cloned(),
        current.assignment(),
    );
    if !tree.set_parent(&action.node_id, action.previous_parent_id.as_ref()) {
        return None;
    }
    tree.set_assignment(&action.node_id, action.previous_assignment.clone());
    Some(inverse)
}

fn log_step(step: Result<MoveAction, HistoryError>) -> Option<MoveAction> {
    match step {
        Ok(action) => Some(action),
        Err(HistoryError::NoMoreUndos | HistoryError::NoMoreRedos) => None,
        Err(err) => {
            tracing::warn!(error = %err, "History entry dropped");
            None
        }
    }
}
