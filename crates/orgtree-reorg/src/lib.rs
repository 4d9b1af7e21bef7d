//! OrgTree reorganization engine
//!
//! Turns the flat position directory into a rooted tree, classifies every
//! node's role, and runs the interactive reorganization session: drag-and-drop
//! reparenting with attribute propagation, linear undo/redo, cancel, and a
//! best-effort batch commit back to the directory store.
//!
//! ```text
//! DirectoryStore ─▶ HierarchyBuilder ─▶ OrgTree ─▶ roles::classify
//!                                          │
//!                                          ▼
//!                ReorgSession (drag protocol, RuleTable, MoveHistory)
//!                                          │
//!                                          ▼
//!                      CommitManager ─▶ DirectoryStore
//! ```
//!
//! [`ReorgEngine`] wires the pieces together for a presentation layer.

pub mod commit;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod propagation;
pub mod roles;
pub mod session;
pub mod tree;
pub mod view_state;

pub use commit::{CommitFailure, CommitManager, CommitReport, CommittedMove};
pub use engine::ReorgEngine;
pub use error::{ReorgError, Result};
pub use geometry::{Point, Rect};
pub use hierarchy::{BuildOutcome, HierarchyBuilder, StructuralDiagnostic};
pub use propagation::{PropagationRule, RoleMatch, RuleTable, TeamEffect};
pub use roles::{classify, classify_all};
pub use session::{DragOutcome, DragState, ReorgSession, SessionMode};
pub use tree::OrgTree;
pub use view_state::ViewStateCache;
