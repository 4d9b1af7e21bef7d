// Expand or collapse a subtree in the saved view state

use orgtree_domain::PositionId;

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};

pub struct ToggleCommand {
    pub id: String,
}

impl ToggleCommand {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Flip the node and persist; returns whether it is now expanded
    pub async fn run(&self, context: &CommandContext) -> CliResult<bool> {
        let id = PositionId::new(self.id.as_str())
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;
        let engine = context.open_engine().await?;
        if !engine.tree().contains(&id) {
            return Err(CliError::PositionNotFound { id: self.id.clone() });
        }

        let mut view = context.open_view_state().await?;
        let expanded = view.toggle(&id);
        let pruned = view.prune(engine.tree());
        view.persist().await?;
        tracing::debug!(node_id = %id, expanded, pruned, "View state saved");
        Ok(expanded)
    }
}

#[async_trait::async_trait]
impl Command for ToggleCommand {
    async fn execute(&self, context: &CommandContext) -> CliResult<()> {
        let state = if self.run(context).await? {
            "expanded"
        } else {
            "collapsed"
        };
        println!("{} {}", self.id, state);
        Ok(())
    }
}
