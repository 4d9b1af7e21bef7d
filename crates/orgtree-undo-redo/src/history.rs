//! History management and navigation

use crate::error::HistoryError;
use crate::models::MoveAction;

/// Manages the undo and redo stacks of a reorganization session
///
/// The history never touches the tree itself. `undo` and `redo` hand the
/// action to a caller-supplied closure which applies it and returns the
/// inverse action (the state it just overwrote), or `None` when the node is
/// gone. Dropped actions leave both stacks consistent for the remaining
/// entries.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    undo_stack: Vec<MoveAction>,
    redo_stack: Vec<MoveAction>,
}

impl MoveHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted move. Any redo history is discarded.
    pub fn record(&mut self, action: MoveAction) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Undo the most recent move
    pub fn undo<F>(&mut self, apply: F) -> Result<MoveAction, HistoryError>
    where
        F: FnOnce(&MoveAction) -> Option<MoveAction>,
    {
        let action = self.undo_stack.pop().ok_or(HistoryError::NoMoreUndos)?;
        match apply(&action) {
            Some(inverse) => {
                self.redo_stack.push(inverse);
                Ok(action)
            }
            None => {
                tracing::warn!(node_id = %action.node_id, "Dropping undo entry for missing node");
                Err(HistoryError::target_missing(action.node_id.as_str()))
            }
        }
    }

    /// Redo the most recently undone move
    pub fn redo<F>(&mut self, apply: F) -> Result<MoveAction, HistoryError>
    where
        F: FnOnce(&MoveAction) -> Option<MoveAction>,
    {
        let action = self.redo_stack.pop().ok_or(HistoryError::NoMoreRedos)?;
        match apply(&action) {
            Some(inverse) => {
                self.undo_stack.push(inverse);
                Ok(action)
            }
            None => {
                tracing::warn!(node_id = %action.node_id, "Dropping redo entry for missing node");
                Err(HistoryError::target_missing(action.node_id.as_str()))
            }
        }
    }

    /// Empty both stacks, returning the undo entries newest first.
    ///
    /// Applying the returned actions in order reverts every recorded move.
    pub fn drain_for_revert(&mut self) -> Vec<MoveAction> {
        self.redo_stack.clear();
        let mut actions = std::mem::take(&mut self.undo_stack);
        actions.reverse();
        actions
    }

    /// Empty both stacks, returning the undo entries oldest first
    pub fn take_all(&mut self) -> Vec<MoveAction> {
        self.redo_stack.clear();
        std::mem::take(&mut self.undo_stack)
    }

    /// Discard all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undoable moves
    pub fn undoable_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redoable moves
    pub fn redoable_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first
    pub fn undo_actions(&self) -> &[MoveAction] {
        &self.undo_stack
    }

    /// Redo entries, oldest first
    pub fn redo_actions(&self) -> &[MoveAction] {
        &self.redo_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgtree_domain::{Assignment, PositionId};

    fn action(node: &str, prev: &str) -> MoveAction {
        MoveAction::new(
            PositionId::from(node),
            Some(PositionId::from(prev)),
            Assignment::default(),
        )
    }

    // Identity inverse: swaps in a marker parent so we can see what was pushed.
    fn inverse_of(action: &MoveAction) -> Option<MoveAction> {
        Some(MoveAction::new(
            action.node_id.clone(),
            Some(PositionId::from("current")),
            Assignment::default(),
        ))
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = MoveHistory::new();
        history.record(action("a", "x"));
        history.undo(inverse_of).unwrap();
        assert!(history.can_redo());

        history.record(action("b", "y"));
        assert!(!history.can_redo());
        assert_eq!(history.undoable_count(), 1);
    }

    #[test]
    fn test_undo_pushes_inverse_to_redo() {
        let mut history = MoveHistory::new();
        history.record(action("a", "x"));

        let undone = history.undo(inverse_of).unwrap();
        assert_eq!(undone.previous_parent_id, Some(PositionId::from("x")));
        assert_eq!(
            history.redo_actions()[0].previous_parent_id,
            Some(PositionId::from("current"))
        );

        let redone = history.redo(inverse_of).unwrap();
        assert_eq!(redone.previous_parent_id, Some(PositionId::from("current")));
        assert_eq!(history.undoable_count(), 1);
        assert_eq!(history.redoable_count(), 0);
    }

    #[test]
    fn test_empty_stacks() {
        let mut history = MoveHistory::new();
        assert_eq!(history.undo(inverse_of), Err(HistoryError::NoMoreUndos));
        assert_eq!(history.redo(inverse_of), Err(HistoryError::NoMoreRedos));
    }

    #[test]
    fn test_missing_target_is_dropped() {
        let mut history = MoveHistory::new();
        history.record(action("a", "x"));
        history.record(action("gone", "y"));

        let err = history.undo(|_| None).unwrap_err();
        assert_eq!(err, HistoryError::target_missing("gone"));
        assert_eq!(history.undoable_count(), 1);
        assert_eq!(history.redoable_count(), 0);

        assert!(history.undo(inverse_of).is_ok());
    }

    #[test]
    fn test_drain_for_revert_is_newest_first() {
        let mut history = MoveHistory::new();
        history.record(action("a", "x"));
        history.record(action("b", "y"));
        history.record(action("c", "z"));
        history.undo(inverse_of).unwrap();

        let drained = history.drain_for_revert();
        let ids: Vec<_> = drained.iter().map(|a| a.node_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_take_all_is_oldest_first() {
        let mut history = MoveHistory::new();
        history.record(action("a", "x"));
        history.record(action("b", "y"));

        let taken = history.take_all();
        assert_eq!(taken[0].node_id.as_str(), "a");
        assert_eq!(taken[1].node_id.as_str(), "b");
        assert!(!history.can_undo());
    }
}
