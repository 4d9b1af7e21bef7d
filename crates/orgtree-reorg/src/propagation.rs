//! Department/team propagation on moves
//!
//! Department and team are derived from where a node sits in the tree. When a
//! node moves, its new assignment is computed from an ordered rule table keyed
//! by the mover's role before the move and the target's role. The first
//! matching rule wins.
//!
//! | mover        | target          | department | team            |
//! |--------------|-----------------|------------|-----------------|
//! | any          | team leader     | inherit    | inherit target  |
//! | team leader  | department head | inherit    | keep own        |
//! | team member  | department head | inherit    | clear           |
//! | any          | department head | inherit    | clear           |
//!
//! A team-member target is evaluated as a team leader, since the drop makes
//! it the mover's leader. A move under the top executive matches no rule and
//! leaves the assignment untouched.

use orgtree_domain::{Assignment, Role};

/// Which mover roles a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMatch {
    Any,
    Is(Role),
}

impl RoleMatch {
    fn matches(&self, role: Role) -> bool {
        match self {
            RoleMatch::Any => true,
            RoleMatch::Is(expected) => *expected == role,
        }
    }
}

/// What happens to the mover's team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamEffect {
    InheritTarget,
    KeepOwn,
    Clear,
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationRule {
    pub mover: RoleMatch,
    pub target: Role,
    pub inherit_department: bool,
    pub team: TeamEffect,
}

impl PropagationRule {
    pub fn new(mover: RoleMatch, target: Role, team: TeamEffect) -> Self {
        Self {
            mover,
            target,
            inherit_department: true,
            team,
        }
    }

    fn apply(&self, mover: &Assignment, target: &Assignment) -> Assignment {
        let mut next = mover.clone();
        if self.inherit_department {
            next.inherit_department(target);
        }
        match self.team {
            TeamEffect::InheritTarget => next.inherit_team(target),
            TeamEffect::KeepOwn => {}
            TeamEffect::Clear => next.clear_team(),
        }
        next
    }
}

/// Ordered propagation rules, first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<PropagationRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<PropagationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PropagationRule] {
        &self.rules
    }

    /// First rule matching the pair, after normalizing the target role
    pub fn resolve(&self, mover_role: Role, target_role: Role) -> Option<&PropagationRule> {
        let target_role = effective_target_role(target_role);
        self.rules
            .iter()
            .find(|r| r.target == target_role && r.mover.matches(mover_role))
    }

    /// New assignment for a node moving under `target`
    pub fn propagate(
        &self,
        mover_role: Role,
        mover: &Assignment,
        target_role: Role,
        target: &Assignment,
    ) -> Assignment {
        match self.resolve(mover_role, target_role) {
            Some(rule) => rule.apply(mover, target),
            None => {
                tracing::debug!(?mover_role, ?target_role, "No propagation rule, assignment kept");
                mover.clone()
            }
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(vec![
            PropagationRule::new(RoleMatch::Any, Role::TeamLeader, TeamEffect::InheritTarget),
            PropagationRule::new(
                RoleMatch::Is(Role::TeamLeader),
                Role::DepartmentHead,
                TeamEffect::KeepOwn,
            ),
            PropagationRule::new(
                RoleMatch::Is(Role::TeamMember),
                Role::DepartmentHead,
                TeamEffect::Clear,
            ),
            PropagationRule::new(RoleMatch::Any, Role::DepartmentHead, TeamEffect::Clear),
        ])
    }
}

fn effective_target_role(role: Role) -> Role {
    match role {
        Role::TeamMember => Role::TeamLeader,
        other => other,
    }
}
