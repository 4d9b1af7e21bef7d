//! Core domain entities

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Assignment, PositionId};

/// One entry in the organizational directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Back-reference to the manager's position; never an owning link
    #[serde(default)]
    pub manager_id: Option<PositionId>,
    #[serde(default)]
    pub department_code: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub team_code: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    /// Explicit override, independent of tree shape
    #[serde(default)]
    pub is_department_head: bool,
}

impl Position {
    /// Create a position with no manager and an empty assignment
    pub fn new(id: impl Into<PositionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            manager_id: None,
            department_code: String::new(),
            department: String::new(),
            team_code: None,
            team: None,
            is_department_head: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_manager(mut self, manager_id: impl Into<PositionId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.set_assignment(assignment);
        self
    }

    pub fn department_head(mut self) -> Self {
        self.is_department_head = true;
        self
    }

    /// Current department/team attributes as one value
    pub fn assignment(&self) -> Assignment {
        Assignment {
            department_code: self.department_code.clone(),
            department: self.department.clone(),
            team_code: self.team_code.clone(),
            team: self.team.clone(),
        }
    }

    /// Overwrite the department/team attributes
    pub fn set_assignment(&mut self, assignment: Assignment) {
        self.department_code = assignment.department_code;
        self.department = assignment.department;
        self.team_code = assignment.team_code;
        self.team = assignment.team;
    }

    /// Apply a store patch in place
    pub fn apply_patch(&mut self, patch: &PositionPatch) {
        self.manager_id = patch.manager_id.clone();
        self.set_assignment(patch.assignment.clone());
    }
}

/// Payload written back to the directory for a moved position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPatch {
    pub manager_id: Option<PositionId>,
    #[serde(flatten)]
    pub assignment: Assignment,
}

impl PositionPatch {
    /// Patch describing the persisted structural state of a position
    pub fn from_position(position: &Position) -> Self {
        Self {
            manager_id: position.manager_id.clone(),
            assignment: position.assignment(),
        }
    }
}

/// Organizational role derived from tree shape and the department-head flag.
///
/// Roles are never stored; they are recomputed from the current tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    TopExecutive,
    DepartmentHead,
    TeamLeader,
    TeamMember,
}

impl Role {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Role::TopExecutive => "top executive",
            Role::DepartmentHead => "department head",
            Role::TeamLeader => "team leader",
            Role::TeamMember => "team member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
