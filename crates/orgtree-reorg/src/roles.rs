//! Role classification
//!
//! Roles are a pure function of the current tree plus each position's
//! department-head override. The precedence is fixed: a department head with
//! reports is still a department head, never a team leader.

use orgtree_domain::{PositionId, Role};

use crate::tree::OrgTree;

/// Classify one node; `None` when the id is not in the tree
pub fn classify(tree: &OrgTree, id: &PositionId) -> Option<Role> {
    let position = tree.get(id)?;
    let role = if tree.is_root(id) {
        Role::TopExecutive
    } else if position.is_department_head {
        Role::DepartmentHead
    } else if tree.has_children(id) {
        Role::TeamLeader
    } else {
        Role::TeamMember
    };
    Some(role)
}

/// Role of every node, in directory order
pub fn classify_all(tree: &OrgTree) -> Vec<(PositionId, Role)> {
    tree.positions()
        .filter_map(|p| classify(tree, &p.id).map(|role| (p.id.clone(), role)))
        .collect()
}
