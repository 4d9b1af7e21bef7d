//! Value objects representing immutable domain concepts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Position identifier, issued by the directory and stable across sessions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(String);

impl PositionId {
    /// Create a position id, rejecting blank values
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidPositionId {
                reason: "position id cannot be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PositionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PositionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Department and team a position belongs to.
///
/// These attributes follow the structural position of a node in the tree and
/// are recomputed by the propagation rules whenever the node moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub department_code: String,
    pub department: String,
    pub team_code: Option<String>,
    pub team: Option<String>,
}

impl Assignment {
    /// Department-level assignment with no team
    pub fn department(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            department_code: code.into(),
            department: name.into(),
            team_code: None,
            team: None,
        }
    }

    /// Builder-style team setter
    pub fn with_team(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.team_code = Some(code.into());
        self.team = Some(name.into());
        self
    }

    /// Whether a team is assigned
    pub fn has_team(&self) -> bool {
        self.team_code.is_some() || self.team.is_some()
    }

    /// Copy the department from another assignment, leaving the team untouched
    pub fn inherit_department(&mut self, from: &Assignment) {
        self.department_code = from.department_code.clone();
        self.department = from.department.clone();
    }

    /// Copy the team from another assignment
    pub fn inherit_team(&mut self, from: &Assignment) {
        self.team_code = from.team_code.clone();
        self.team = from.team.clone();
    }

    /// Drop the team assignment
    pub fn clear_team(&mut self) {
        self.team_code = None;
        self.team = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_id_rejects_blank() {
        assert!(PositionId::new("").is_err());
        assert!(PositionId::new("   ").is_err());
        assert_eq!(PositionId::new("p-1").unwrap().as_str(), "p-1");
    }

    #[test]
    fn test_position_id_serializes_as_plain_string() {
        let id = PositionId::from("p-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-7\"");
    }

    #[test]
    fn test_inherit_department_keeps_team() {
        let mut own = Assignment::department("ENG", "Engineering").with_team("T1", "Alpha");
        let target = Assignment::department("OPS", "Operations").with_team("T9", "Beta");
        own.inherit_department(&target);
        assert_eq!(own.department_code, "OPS");
        assert_eq!(own.team.as_deref(), Some("Alpha"));
    }

    #[test]
    fn test_clear_team() {
        let mut own = Assignment::department("ENG", "Engineering").with_team("T1", "Alpha");
        own.clear_team();
        assert!(!own.has_team());
    }
}
