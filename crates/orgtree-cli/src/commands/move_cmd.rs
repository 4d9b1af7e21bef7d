// Reparent positions by id and commit the result

use orgtree_domain::{Position, PositionId};
use orgtree_reorg::CommitReport;

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};

/// Apply `(position, new manager)` pairs through a reorganization session
pub struct MoveCommand {
    pub moves: Vec<(PositionId, PositionId)>,
    pub dry_run: bool,
}

/// What a move command did
#[derive(Debug)]
pub struct MoveSummary {
    /// Final local state of every position that moved
    pub moved: Vec<Position>,
    /// Pairs the session refused (self, root, cycle, current manager)
    pub skipped: Vec<(PositionId, PositionId)>,
    /// `None` for a dry run
    pub report: Option<CommitReport>,
}

impl MoveCommand {
    /// Parse alternating `ID MANAGER` arguments
    pub fn from_args(args: &[String], dry_run: bool) -> CliResult<Self> {
        if args.is_empty() || args.len() % 2 != 0 {
            return Err(CliError::invalid_argument(
                "expected pairs of <ID> <NEW-MANAGER-ID>",
            ));
        }
        let mut moves = Vec::with_capacity(args.len() / 2);
        for pair in args.chunks(2) {
            let id = PositionId::new(pair[0].as_str())
                .map_err(|e| CliError::invalid_argument(e.to_string()))?;
            let target = PositionId::new(pair[1].as_str())
                .map_err(|e| CliError::invalid_argument(e.to_string()))?;
            moves.push((id, target));
        }
        Ok(Self { moves, dry_run })
    }

    pub async fn run(&self, context: &CommandContext) -> CliResult<MoveSummary> {
        let mut engine = context.open_engine().await?;

        for (id, target) in &self.moves {
            for known in [id, target] {
                if !engine.tree().contains(known) {
                    return Err(CliError::PositionNotFound {
                        id: known.to_string(),
                    });
                }
            }
        }

        engine.enable_editing().await?;
        let mut moved_ids: Vec<PositionId> = Vec::new();
        let mut skipped = Vec::new();
        for (id, target) in &self.moves {
            match engine.session_mut().move_node(id, target) {
                Some(_) => {
                    if !moved_ids.contains(id) {
                        moved_ids.push(id.clone());
                    }
                }
                None => skipped.push((id.clone(), target.clone())),
            }
        }

        let moved: Vec<Position> = moved_ids
            .iter()
            .filter_map(|id| engine.tree().get(id).cloned())
            .collect();

        let report = if self.dry_run {
            let discarded = engine.cancel();
            tracing::info!(discarded, "Dry run, nothing written");
            None
        } else {
            Some(engine.commit().await?)
        };

        Ok(MoveSummary {
            moved,
            skipped,
            report,
        })
    }
}

impl MoveSummary {
    pub fn is_complete(&self) -> bool {
        self.report.as_ref().map_or(true, CommitReport::is_complete)
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for position in &self.moved {
            let manager = position
                .manager_id
                .as_ref()
                .map(PositionId::to_string)
                .unwrap_or_else(|| "-".to_string());
            let mut line = format!("{} -> {}", position.id, manager);
            if !position.department.is_empty() {
                line.push_str(&format!(" [{}", position.department));
                if let Some(team) = &position.team {
                    line.push_str(&format!(" / {}", team));
                }
                line.push(']');
            }
            lines.push(line);
        }
        for (id, target) in &self.skipped {
            lines.push(format!("skipped {} -> {}", id, target));
        }

        match &self.report {
            None => lines.push(format!("Dry run: {} move(s) not saved", self.moved.len())),
            Some(report) => {
                for failure in &report.failed {
                    lines.push(format!(
                        "failed {}: {}",
                        failure.action.node_id, failure.error
                    ));
                }
                lines.push(format!(
                    "Saved {}, failed {}, unchanged {}",
                    report.succeeded.len(),
                    report.failed.len(),
                    report.unchanged.len()
                ));
            }
        }
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl Command for MoveCommand {
    async fn execute(&self, context: &CommandContext) -> CliResult<()> {
        let summary = self.run(context).await?;
        println!("{}", summary.render());

        match &summary.report {
            Some(report) if !report.is_complete() => Err(CliError::CommitIncomplete {
                failed: report.failed.len(),
                attempted: report.attempted(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgtree_config::OrgTreeConfig;
    use orgtree_domain::{Assignment, DirectoryStore};
    use orgtree_persistence::JsonDirectoryStore;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    async fn context() -> (TempDir, PathBuf, CommandContext) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("directory.json");
        let eng = Assignment::department("ENG", "Engineering");
        let ops = Assignment::department("OPS", "Operations");
        JsonDirectoryStore::new(&path)
            .write_all(&[
                Position::new("ceo", "Grace").with_title("CEO"),
                Position::new("eng", "Linus")
                    .with_manager("ceo")
                    .department_head()
                    .with_assignment(eng.clone()),
                Position::new("ops", "Margaret")
                    .with_manager("ceo")
                    .department_head()
                    .with_assignment(ops.clone()),
                Position::new("lead", "Dennis")
                    .with_manager("ops")
                    .with_assignment(ops.clone().with_team("B", "Beta")),
                Position::new("dev", "Ken")
                    .with_manager("lead")
                    .with_assignment(ops.with_team("B", "Beta")),
                Position::new("intern", "Frances")
                    .with_manager("eng")
                    .with_assignment(eng),
            ])
            .await
            .unwrap();
        let context = CommandContext::new(OrgTreeConfig::default(), Some(path.clone()));
        (dir, path, context)
    }

    async fn stored(path: &PathBuf, id: &str) -> Position {
        JsonDirectoryStore::new(path)
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.id.as_str() == id)
            .unwrap()
    }

    #[test]
    fn test_args_must_pair_up() {
        assert!(MoveCommand::from_args(&args(&["a"]), false).is_err());
        assert!(MoveCommand::from_args(&[], false).is_err());
        let command = MoveCommand::from_args(&args(&["a", "b", "c", "d"]), true).unwrap();
        assert_eq!(command.moves.len(), 2);
        assert!(command.dry_run);
    }

    #[tokio::test]
    async fn test_move_commits_with_propagation() {
        let (_dir, path, context) = context().await;
        let command = MoveCommand::from_args(&args(&["intern", "lead"]), false).unwrap();

        let summary = command.run(&context).await.unwrap();
        assert!(summary.is_complete());
        assert_eq!(summary.render().lines().next(), Some("intern -> lead [Operations / Beta]"));

        let intern = stored(&path, "intern").await;
        assert_eq!(intern.manager_id, Some(PositionId::from("lead")));
        assert_eq!(intern.department_code, "OPS");
        assert_eq!(intern.team.as_deref(), Some("Beta"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (_dir, path, context) = context().await;
        let command = MoveCommand::from_args(&args(&["dev", "eng"]), true).unwrap();

        let summary = command.run(&context).await.unwrap();
        assert!(summary.report.is_none());
        assert_eq!(summary.moved[0].team, None);
        assert!(summary.render().contains("Dry run: 1 move(s) not saved"));

        let dev = stored(&path, "dev").await;
        assert_eq!(dev.manager_id, Some(PositionId::from("lead")));
        assert_eq!(dev.team.as_deref(), Some("Beta"));
    }

    #[tokio::test]
    async fn test_invalid_moves_are_skipped() {
        let (_dir, _path, context) = context().await;
        // Root, own manager, and own subordinate.
        let command = MoveCommand::from_args(
            &args(&["ceo", "eng", "dev", "lead", "lead", "dev"]),
            false,
        )
        .unwrap();

        let summary = command.run(&context).await.unwrap();
        assert!(summary.moved.is_empty());
        assert_eq!(summary.skipped.len(), 3);
        assert_eq!(summary.report.as_ref().map(|r| r.attempted()), Some(0));
    }

    #[tokio::test]
    async fn test_unknown_id_aborts_before_editing() {
        let (_dir, _path, context) = context().await;
        let command = MoveCommand::from_args(&args(&["dev", "ghost"]), false).unwrap();
        assert!(matches!(
            command.run(&context).await,
            Err(CliError::PositionNotFound { id }) if id == "ghost"
        ));
    }
}
