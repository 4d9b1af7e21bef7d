// Show the role of one position

use orgtree_domain::PositionId;

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};

pub struct RoleCommand {
    pub id: String,
}

impl RoleCommand {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub async fn render(&self, context: &CommandContext) -> CliResult<String> {
        let id = PositionId::new(self.id.as_str())
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;
        let engine = context.open_engine().await?;

        let (Some(position), Some(role)) = (engine.tree().get(&id), engine.role_of(&id)) else {
            return Err(CliError::PositionNotFound { id: self.id.clone() });
        };
        let manager = engine
            .tree()
            .parent_of(&id)
            .and_then(|m| engine.tree().get(m))
            .map(|m| format!(", reports to {} ({})", m.name, m.id))
            .unwrap_or_default();
        Ok(format!("{} ({}): {}{}", position.name, id, role, manager))
    }
}

#[async_trait::async_trait]
impl Command for RoleCommand {
    async fn execute(&self, context: &CommandContext) -> CliResult<()> {
        println!("{}", self.render(context).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgtree_config::OrgTreeConfig;
    use orgtree_domain::Position;
    use orgtree_persistence::JsonDirectoryStore;
    use tempfile::TempDir;

    async fn context() -> (TempDir, CommandContext) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("directory.json");
        JsonDirectoryStore::new(&path)
            .write_all(&[
                Position::new("ceo", "Grace").with_title("CEO"),
                Position::new("lead", "Ada").with_manager("ceo"),
                Position::new("dev", "Alan").with_manager("lead"),
            ])
            .await
            .unwrap();
        (dir, CommandContext::new(OrgTreeConfig::default(), Some(path)))
    }

    #[tokio::test]
    async fn test_role_with_manager() {
        let (_dir, context) = context().await;
        let out = RoleCommand::new("lead").render(&context).await.unwrap();
        assert_eq!(out, "Ada (lead): team leader, reports to Grace (ceo)");

        let root = RoleCommand::new("ceo").render(&context).await.unwrap();
        assert_eq!(root, "Grace (ceo): top executive");
    }

    #[tokio::test]
    async fn test_unknown_and_blank_ids() {
        let (_dir, context) = context().await;
        assert!(matches!(
            RoleCommand::new("ghost").render(&context).await,
            Err(CliError::PositionNotFound { .. })
        ));
        assert!(matches!(
            RoleCommand::new("  ").render(&context).await,
            Err(CliError::InvalidArgument { .. })
        ));
    }
}
