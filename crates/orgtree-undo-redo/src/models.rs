//! History data models

use orgtree_domain::{Assignment, PositionId};
use serde::{Deserialize, Serialize};

/// One reparenting event, carrying everything needed to invert it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAction {
    /// The node that moved
    pub node_id: PositionId,
    /// Parent before the move; `None` when the node was the root
    pub previous_parent_id: Option<PositionId>,
    /// Department/team attributes before the move
    pub previous_assignment: Assignment,
}

impl MoveAction {
    /// Create a new move action
    pub fn new(
        node_id: PositionId,
        previous_parent_id: Option<PositionId>,
        previous_assignment: Assignment,
    ) -> Self {
        Self {
            node_id,
            previous_parent_id,
            previous_assignment,
        }
    }
}
