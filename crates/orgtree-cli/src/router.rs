// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    Command, CommandContext, MoveCommand, RoleCommand, ToggleCommand, TreeCommand,
};
use crate::error::CliResult;

/// OrgTree - inspect and reorganize an organizational hierarchy
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(bin_name = "orgtree")]
#[command(about = "Inspect and reorganize an organizational hierarchy")]
#[command(version)]
#[command(author = "OrgTree Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/orgtree/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory JSON file, overriding storage.directory_path
    #[arg(short, long, global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the hierarchy with roles and any structural repairs
    Tree {
        /// Emit JSON instead of an indented listing
        #[arg(long)]
        json: bool,

        /// Ignore collapsed subtrees in the saved view state
        #[arg(long)]
        all: bool,
    },

    /// Collapse or expand a subtree in the saved view state
    Toggle {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show the role of one position
    Role {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Reparent positions and commit the result
    Move {
        /// Alternating position ids and new manager ids
        #[arg(value_name = "ID NEW-MANAGER-ID", num_args = 2.., required = true)]
        ids: Vec<String>,

        /// Show the outcome without writing to the directory
        #[arg(long)]
        dry_run: bool,
    },
}

/// Routes parsed commands to their handlers
pub struct CommandRouter;

impl CommandRouter {
    pub async fn execute(command: &Commands, context: &CommandContext) -> CliResult<()> {
        match command {
            Commands::Tree { json, all } => {
                TreeCommand::new(*json)
                    .show_all(*all)
                    .execute(context)
                    .await
            }
            Commands::Toggle { id } => ToggleCommand::new(id.clone()).execute(context).await,
            Commands::Role { id } => RoleCommand::new(id.clone()).execute(context).await,
            Commands::Move { ids, dry_run } => {
                MoveCommand::from_args(ids, *dry_run)?
                    .execute(context)
                    .await
            }
        }
    }
}
