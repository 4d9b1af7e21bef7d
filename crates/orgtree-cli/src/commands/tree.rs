// Print the hierarchy

use orgtree_domain::Position;
use orgtree_reorg::{ReorgEngine, ViewStateCache};
use serde_json::json;

use super::{Command, CommandContext};
use crate::error::CliResult;

/// Print every position indented under its manager, with its role.
///
/// Subtrees collapsed in the saved view state are folded unless `all` is set.
pub struct TreeCommand {
    pub json: bool,
    pub all: bool,
}

impl TreeCommand {
    pub fn new(json: bool) -> Self {
        Self { json, all: false }
    }

    pub fn show_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub async fn render(&self, context: &CommandContext) -> CliResult<String> {
        let engine = context.open_engine().await?;
        if engine.tree().is_empty() {
            return Ok(format!(
                "No positions in {}",
                context.directory_path().display()
            ));
        }
        let view = context.open_view_state().await?;
        if self.json {
            render_json(&engine, &view)
        } else {
            Ok(render_text(&engine, &view, self.all))
        }
    }
}

#[async_trait::async_trait]
impl Command for TreeCommand {
    async fn execute(&self, context: &CommandContext) -> CliResult<()> {
        println!("{}", self.render(context).await?);
        Ok(())
    }
}

fn unit_label(position: &Position) -> Option<String> {
    match (&position.department, &position.team) {
        (dept, _) if dept.is_empty() => None,
        (dept, Some(team)) => Some(format!("{} / {}", dept, team)),
        (dept, None) => Some(dept.clone()),
    }
}

fn render_text(engine: &ReorgEngine, view: &ViewStateCache, all: bool) -> String {
    let tree = engine.tree();
    let mut lines = Vec::new();
    let mut folded_at: Option<usize> = None;
    for (depth, position) in tree.depth_first() {
        match folded_at {
            Some(d) if depth > d => continue,
            _ => folded_at = None,
        }
        let role = engine
            .role_of(&position.id)
            .map(|r| r.label())
            .unwrap_or("unknown");
        let mut line = format!(
            "{}{} ({}) - {}",
            "  ".repeat(depth),
            position.name,
            position.id,
            role
        );
        if let Some(unit) = unit_label(position) {
            line.push_str(&format!(" [{}]", unit));
        }
        if !all && tree.has_children(&position.id) && !view.is_expanded(&position.id) {
            line.push_str(" (+)");
            folded_at = Some(depth);
        }
        lines.push(line);
    }

    if !engine.diagnostics().is_empty() {
        lines.push(String::new());
        lines.push("Repairs applied while building the tree:".to_string());
        lines.extend(engine.diagnostics().iter().map(|d| format!("  - {}", d)));
    }
    lines.join("\n")
}

fn render_json(engine: &ReorgEngine, view: &ViewStateCache) -> CliResult<String> {
    let nodes: Vec<_> = engine
        .tree()
        .depth_first()
        .into_iter()
        .map(|(depth, position)| {
            json!({
                "depth": depth,
                "id": position.id,
                "name": position.name,
                "managerId": position.manager_id,
                "role": engine.role_of(&position.id),
                "department": position.department,
                "team": position.team,
                "expanded": view.is_expanded(&position.id),
            })
        })
        .collect();
    let document = json!({
        "positions": nodes,
        "diagnostics": engine.diagnostics(),
    });
    Ok(serde_json::to_string_pretty(&document)?)
}
