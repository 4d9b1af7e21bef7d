//! Hierarchy construction from the flat directory
//!
//! The builder never fails. Broken manager references, cycles, blank or
//! duplicate ids and competing roots are repaired and reported as
//! [`StructuralDiagnostic`]s so that something can always be rendered.

use std::collections::{HashMap, HashSet};
use std::fmt;

use orgtree_config::HierarchyConfig;
use orgtree_domain::{Position, PositionId};
use serde::Serialize;

use crate::tree::OrgTree;

/// A structural anomaly corrected while building the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralDiagnostic {
    /// A position without an id was dropped
    BlankId { name: String },
    /// A second position with an already-seen id was dropped
    DuplicateId { node_id: PositionId },
    /// The manager reference pointed at no known position
    DanglingManager {
        node_id: PositionId,
        manager_id: PositionId,
    },
    /// The node was detached from its manager to break a cycle
    CycleBroken {
        node_id: PositionId,
        former_manager_id: PositionId,
    },
    /// A competing root was placed under the main root
    RootReattached {
        node_id: PositionId,
        root_id: PositionId,
    },
    /// No root existed, so the first position was promoted
    RootForced { node_id: PositionId },
}

impl fmt::Display for StructuralDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankId { name } => write!(f, "position '{}' has no id", name),
            Self::DuplicateId { node_id } => write!(f, "duplicate position id {}", node_id),
            Self::DanglingManager {
                node_id,
                manager_id,
            } => write!(f, "{} reports to unknown manager {}", node_id, manager_id),
            Self::CycleBroken {
                node_id,
                former_manager_id,
            } => write!(
                f,
                "{} detached from {} to break a reporting cycle",
                node_id, former_manager_id
            ),
            Self::RootReattached { node_id, root_id } => {
                write!(f, "{} placed under main root {}", node_id, root_id)
            }
            Self::RootForced { node_id } => write!(f, "{} promoted to root", node_id),
        }
    }
}

/// Result of a build: the tree plus everything that had to be repaired
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub tree: OrgTree,
    pub diagnostics: Vec<StructuralDiagnostic>,
}

/// Converts the flat directory into a rooted, acyclic [`OrgTree`]
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    config: HierarchyConfig,
}

impl HierarchyBuilder {
    pub fn new(config: HierarchyConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, positions: Vec<Position>) -> BuildOutcome {
        let mut diagnostics = Vec::new();
        let positions = dedupe(positions, &mut diagnostics);

        if positions.is_empty() {
            return BuildOutcome {
                tree: OrgTree::default(),
                diagnostics,
            };
        }

        let index: HashMap<&PositionId, usize> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (&p.id, i))
            .collect();

        let mut parents = resolve_parents(&positions, &index, &mut diagnostics);
        break_cycles(&positions, &mut parents, &mut diagnostics);
        self.resolve_root(&positions, &mut parents, &mut diagnostics);

        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "Repaired directory structure");
        }
        tracing::debug!(
            positions = positions.len(),
            repairs = diagnostics.len(),
            "Hierarchy built"
        );

        BuildOutcome {
            tree: OrgTree::from_validated(positions, parents),
            diagnostics,
        }
    }

    fn resolve_root(
        &self,
        positions: &[Position],
        parents: &mut [Option<usize>],
        diagnostics: &mut Vec<StructuralDiagnostic>,
    ) {
        let roots: Vec<usize> = (0..parents.len()).filter(|&i| parents[i].is_none()).collect();

        let main = match roots.as_slice() {
            [] => {
                // Unreachable after cycle breaking, kept so the invariant
                // does not depend on it.
                parents[0] = None;
                diagnostics.push(StructuralDiagnostic::RootForced {
                    node_id: positions[0].id.clone(),
                });
                return;
            }
            [_] => return,
            _ => self.pick_main_root(positions, &roots),
        };

        for &r in roots.iter().filter(|&&r| r != main) {
            parents[r] = Some(main);
            diagnostics.push(StructuralDiagnostic::RootReattached {
                node_id: positions[r].id.clone(),
                root_id: positions[main].id.clone(),
            });
        }
    }

    /// Title match, then department-head flag, then directory order
    fn pick_main_root(&self, positions: &[Position], roots: &[usize]) -> usize {
        roots
            .iter()
            .copied()
            .find(|&r| self.config.is_top_executive_title(&positions[r].title))
            .or_else(|| {
                roots
                    .iter()
                    .copied()
                    .find(|&r| positions[r].is_department_head)
            })
            .unwrap_or(roots[0])
    }
}

fn dedupe(positions: Vec<Position>, diagnostics: &mut Vec<StructuralDiagnostic>) -> Vec<Position> {
    let mut seen = HashSet::new();
    positions
        .into_iter()
        .filter(|p| {
            if p.id.as_str().trim().is_empty() {
                diagnostics.push(StructuralDiagnostic::BlankId {
                    name: p.name.clone(),
                });
                return false;
            }
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                diagnostics.push(StructuralDiagnostic::DuplicateId {
                    node_id: p.id.clone(),
                });
            }
            fresh
        })
        .collect()
}

fn resolve_parents(
    positions: &[Position],
    index: &HashMap<&PositionId, usize>,
    diagnostics: &mut Vec<StructuralDiagnostic>,
) -> Vec<Option<usize>> {
    positions
        .iter()
        .map(|p| {
            let manager = p.manager_id.as_ref().filter(|m| !m.as_str().is_empty())?;
            let parent = index.get(manager).copied();
            if parent.is_none() {
                diagnostics.push(StructuralDiagnostic::DanglingManager {
                    node_id: p.id.clone(),
                    manager_id: manager.clone(),
                });
            }
            parent
        })
        .collect()
}

/// Walk up from every node. Any revisit before reaching a parentless node
/// means the walk entered a cycle, which is broken by detaching the node the
/// walk started from. A cycle member processed later may still be detached
/// for the same cycle.
fn break_cycles(
    positions: &[Position],
    parents: &mut [Option<usize>],
    diagnostics: &mut Vec<StructuralDiagnostic>,
) {
    let mut visited = HashSet::new();
    for origin in 0..parents.len() {
        visited.clear();
        visited.insert(origin);
        let mut current = origin;
        while let Some(parent) = parents[current] {
            if !visited.insert(parent) {
                if let Some(former) = parents[origin].take() {
                    diagnostics.push(StructuralDiagnostic::CycleBroken {
                        node_id: positions[origin].id.clone(),
                        former_manager_id: positions[former].id.clone(),
                    });
                }
                break;
            }
            current = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(positions: Vec<Position>) -> BuildOutcome {
        HierarchyBuilder::default().build(positions)
    }

    fn roots(tree: &OrgTree) -> Vec<String> {
        tree.positions()
            .filter(|p| tree.is_root(&p.id))
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let outcome = build(Vec::new());
        assert!(outcome.tree.is_empty());
        assert!(outcome.tree.root().is_none());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_simple_chain() {
        let outcome = build(vec![
            Position::new("ceo", "Root").with_title("CEO"),
            Position::new("a", "A").with_manager("ceo"),
            Position::new("b", "B").with_manager("a"),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["ceo"]);
        assert_eq!(outcome.tree.parent_of(&"b".into()).unwrap().as_str(), "a");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_dangling_manager_becomes_root_candidate() {
        let outcome = build(vec![
            Position::new("ceo", "Root").with_title("CEO"),
            Position::new("a", "A").with_manager("ghost"),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["ceo"]);
        assert_eq!(outcome.tree.parent_of(&"a".into()).unwrap().as_str(), "ceo");
        assert!(outcome.diagnostics.contains(&StructuralDiagnostic::DanglingManager {
            node_id: "a".into(),
            manager_id: "ghost".into(),
        }));
    }

    #[test]
    fn test_two_node_cycle_is_broken_at_first_member() {
        let outcome = build(vec![
            Position::new("a", "A").with_manager("b"),
            Position::new("b", "B").with_manager("a"),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["a"]);
        assert_eq!(outcome.tree.parent_of(&"b".into()).unwrap().as_str(), "a");
        assert_eq!(
            outcome.diagnostics,
            vec![StructuralDiagnostic::CycleBroken {
                node_id: "a".into(),
                former_manager_id: "b".into(),
            }]
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let outcome = build(vec![
            Position::new("ceo", "Root").with_title("CEO"),
            Position::new("a", "A").with_manager("a"),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["ceo"]);
        assert_eq!(outcome.tree.parent_of(&"a".into()).unwrap().as_str(), "ceo");
    }

    #[test]
    fn test_walk_into_foreign_cycle_detaches_origin() {
        // x -> b, and a <-> b form a cycle x is not part of
        let outcome = build(vec![
            Position::new("x", "X").with_manager("b"),
            Position::new("a", "A").with_manager("b"),
            Position::new("b", "B").with_manager("a"),
        ]);
        assert_eq!(
            outcome.diagnostics[..2],
            [
                StructuralDiagnostic::CycleBroken {
                    node_id: "x".into(),
                    former_manager_id: "b".into(),
                },
                StructuralDiagnostic::CycleBroken {
                    node_id: "a".into(),
                    former_manager_id: "b".into(),
                },
            ]
        );
        assert_eq!(roots(&outcome.tree), vec!["x"]);
        assert_eq!(outcome.tree.parent_of(&"a".into()).unwrap().as_str(), "x");
        assert_eq!(outcome.tree.parent_of(&"b".into()).unwrap().as_str(), "a");
    }

    #[test]
    fn test_root_priority_title_first() {
        let outcome = build(vec![
            Position::new("head", "Head").department_head(),
            Position::new("loner", "Loner"),
            Position::new("boss", "Boss").with_title("ceo"),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["boss"]);
        assert_eq!(outcome.tree.parent_of(&"head".into()).unwrap().as_str(), "boss");
        assert_eq!(outcome.tree.parent_of(&"loner".into()).unwrap().as_str(), "boss");
    }

    #[test]
    fn test_root_priority_department_head_second() {
        let outcome = build(vec![
            Position::new("loner", "Loner"),
            Position::new("head", "Head").department_head(),
        ]);
        assert_eq!(roots(&outcome.tree), vec!["head"]);
    }

    #[test]
    fn test_root_priority_input_order_last() {
        let outcome = build(vec![Position::new("first", "F"), Position::new("second", "S")]);
        assert_eq!(roots(&outcome.tree), vec!["first"]);
        assert!(matches!(
            outcome.diagnostics[0],
            StructuralDiagnostic::RootReattached { .. }
        ));
    }

    #[test]
    fn test_duplicate_ids_dropped() {
        let outcome = build(vec![
            Position::new("a", "First"),
            Position::new("a", "Second"),
        ]);
        assert_eq!(outcome.tree.len(), 1);
        assert_eq!(outcome.tree.get(&"a".into()).unwrap().name, "First");
    }

    #[test]
    fn test_blank_ids_dropped() {
        let positions: Vec<Position> = serde_json::from_str(
            r#"[{"id":"ceo","name":"Root"},{"id":"  ","name":"Nobody","managerId":"ceo"}]"#,
        )
        .unwrap();
        let outcome = build(positions);
        assert_eq!(outcome.tree.len(), 1);
        assert_eq!(
            outcome.diagnostics,
            vec![StructuralDiagnostic::BlankId {
                name: "Nobody".into()
            }]
        );
    }

    #[test]
    fn test_configured_titles() {
        let builder = HierarchyBuilder::new(HierarchyConfig {
            top_executive_titles: vec!["Managing Director".into()],
        });
        let outcome = builder.build(vec![
            Position::new("a", "A").with_title("CEO"),
            Position::new("b", "B").with_title("managing director"),
        ]);
        assert!(outcome.tree.is_root(&"b".into()));
    }
}
