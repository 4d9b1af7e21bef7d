//! Arena-backed organizational tree
//!
//! Positions live in a flat `Vec` in directory order; parent links are arena
//! indices, so the structure never owns its nodes through pointers and a bad
//! link can never leak or dangle. Only [`HierarchyBuilder`] creates trees,
//! which is what guarantees the single-root and acyclic invariants.
//!
//! [`HierarchyBuilder`]: crate::hierarchy::HierarchyBuilder

use std::collections::HashMap;

use orgtree_domain::{Assignment, Position, PositionId};

#[derive(Debug, Clone)]
struct TreeNode {
    position: Position,
    parent: Option<usize>,
}

/// Rooted view over the directory
#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    nodes: Vec<TreeNode>,
    index: HashMap<PositionId, usize>,
    child_counts: Vec<usize>,
}

impl OrgTree {
    /// Assemble a tree from validated parent indices.
    ///
    /// `parents[i]` is the arena index of node `i`'s parent. The caller
    /// guarantees the links are acyclic with exactly one `None`.
    pub(crate) fn from_validated(mut positions: Vec<Position>, parents: Vec<Option<usize>>) -> Self {
        debug_assert_eq!(positions.len(), parents.len());

        let mut child_counts = vec![0; positions.len()];
        for parent in parents.iter().flatten() {
            child_counts[*parent] += 1;
        }

        // Keep manager_id in step with the validated link.
        let parent_ids: Vec<Option<PositionId>> = parents
            .iter()
            .map(|p| p.map(|i| positions[i].id.clone()))
            .collect();
        for (position, parent_id) in positions.iter_mut().zip(parent_ids) {
            position.manager_id = parent_id;
        }

        let index = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        let nodes = positions
            .into_iter()
            .zip(parents)
            .map(|(position, parent)| TreeNode { position, parent })
            .collect();

        Self {
            nodes,
            index,
            child_counts,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &PositionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &PositionId) -> Option<&Position> {
        self.index.get(id).map(|&i| &self.nodes[i].position)
    }

    /// Positions in directory order
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.nodes.iter().map(|n| &n.position)
    }

    /// Parent of `id`; `None` for the root and for unknown ids
    pub fn parent_of(&self, id: &PositionId) -> Option<&PositionId> {
        let i = *self.index.get(id)?;
        self.nodes[i].parent.map(|p| &self.nodes[p].position.id)
    }

    pub fn is_root(&self, id: &PositionId) -> bool {
        self.index
            .get(id)
            .map(|&i| self.nodes[i].parent.is_none())
            .unwrap_or(false)
    }

    pub fn root(&self) -> Option<&Position> {
        self.nodes
            .iter()
            .find(|n| n.parent.is_none())
            .map(|n| &n.position)
    }

    pub fn has_children(&self, id: &PositionId) -> bool {
        self.index
            .get(id)
            .map(|&i| self.child_counts[i] > 0)
            .unwrap_or(false)
    }

    /// Direct reports of `id`, in directory order
    pub fn children_of(&self, id: &PositionId) -> Vec<&Position> {
        let Some(&i) = self.index.get(id) else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .filter(|n| n.parent == Some(i))
            .map(|n| &n.position)
            .collect()
    }

    /// Whether `id` sits somewhere below `ancestor`
    pub fn is_descendant_of(&self, id: &PositionId, ancestor: &PositionId) -> bool {
        let (Some(&start), Some(&target)) = (self.index.get(id), self.index.get(ancestor)) else {
            return false;
        };
        let mut current = self.nodes[start].parent;
        // Bounded walk; the invariant says it ends at the root anyway.
        for _ in 0..self.nodes.len() {
            match current {
                Some(p) if p == target => return true,
                Some(p) => current = self.nodes[p].parent,
                None => return false,
            }
        }
        false
    }

    /// Number of links between `id` and the root
    pub fn depth(&self, id: &PositionId) -> Option<usize> {
        let mut current = self.nodes[*self.index.get(id)?].parent;
        let mut depth = 0;
        while let Some(p) = current {
            depth += 1;
            if depth > self.nodes.len() {
                return None;
            }
            current = self.nodes[p].parent;
        }
        Some(depth)
    }

    /// Pre-order walk from the root, children in directory order
    pub fn depth_first(&self) -> Vec<(usize, &Position)> {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut roots = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Some(p) => children[p].push(i),
                None => roots.push(i),
            }
        }

        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, usize)> = roots.into_iter().rev().map(|r| (0, r)).collect();
        while let Some((depth, i)) = stack.pop() {
            out.push((depth, &self.nodes[i].position));
            stack.extend(children[i].iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }

    /// Snapshot of every position with `manager_id` set to its tree parent
    pub fn to_positions(&self) -> Vec<Position> {
        self.positions().cloned().collect()
    }

    /// Re-link `id` under `parent`, or make it parentless with `None`.
    ///
    /// Returns `false` without touching anything when either id is unknown.
    /// Callers are responsible for keeping the tree acyclic.
    pub(crate) fn set_parent(&mut self, id: &PositionId, parent: Option<&PositionId>) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let new_parent = match parent {
            Some(pid) => match self.index.get(pid) {
                Some(&p) => Some(p),
                None => return false,
            },
            None => None,
        };

        if let Some(old) = self.nodes[i].parent {
            self.child_counts[old] -= 1;
        }
        if let Some(p) = new_parent {
            self.child_counts[p] += 1;
        }
        self.nodes[i].parent = new_parent;
        self.nodes[i].position.manager_id = parent.cloned();
        true
    }

    pub(crate) fn set_assignment(&mut self, id: &PositionId, assignment: Assignment) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.nodes[i].position.set_assignment(assignment);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrgTree {
        // ceo ─┬─ eng ── dev
        //      └─ ops
        let positions = vec![
            Position::new("ceo", "Root"),
            Position::new("eng", "Eng"),
            Position::new("dev", "Dev"),
            Position::new("ops", "Ops"),
        ];
        OrgTree::from_validated(positions, vec![None, Some(0), Some(1), Some(0)])
    }

    #[test]
    fn test_lookup_and_parents() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().unwrap().id.as_str(), "ceo");
        assert_eq!(tree.parent_of(&"dev".into()).unwrap().as_str(), "eng");
        assert!(tree.parent_of(&"ceo".into()).is_none());
        assert_eq!(tree.get(&"dev".into()).unwrap().manager_id, Some("eng".into()));
    }

    #[test]
    fn test_children_and_descendants() {
        let tree = sample();
        let kids: Vec<_> = tree
            .children_of(&"ceo".into())
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(kids, vec!["eng", "ops"]);
        assert!(tree.is_descendant_of(&"dev".into(), &"ceo".into()));
        assert!(!tree.is_descendant_of(&"ops".into(), &"eng".into()));
        assert!(!tree.is_descendant_of(&"eng".into(), &"eng".into()));
    }

    #[test]
    fn test_set_parent_updates_child_counts() {
        let mut tree = sample();
        assert!(tree.has_children(&"eng".into()));
        assert!(tree.set_parent(&"dev".into(), Some(&"ops".into())));
        assert!(!tree.has_children(&"eng".into()));
        assert!(tree.has_children(&"ops".into()));
        assert_eq!(tree.get(&"dev".into()).unwrap().manager_id, Some("ops".into()));
    }

    #[test]
    fn test_set_parent_unknown_ids() {
        let mut tree = sample();
        assert!(!tree.set_parent(&"nope".into(), Some(&"ceo".into())));
        assert!(!tree.set_parent(&"dev".into(), Some(&"nope".into())));
        assert_eq!(tree.parent_of(&"dev".into()).unwrap().as_str(), "eng");
    }

    #[test]
    fn test_depth_first_order() {
        let tree = sample();
        let walk: Vec<_> = tree
            .depth_first()
            .into_iter()
            .map(|(d, p)| (d, p.id.as_str()))
            .collect();
        assert_eq!(walk, vec![(0, "ceo"), (1, "eng"), (2, "dev"), (1, "ops")]);
        assert_eq!(tree.depth(&"dev".into()), Some(2));
    }
}
