// OrgTree CLI entry point

use anyhow::Result;
use clap::Parser;
use orgtree_cli::commands::CommandContext;
use orgtree_cli::{logging, Cli, CliError, CommandRouter};
use orgtree_config::ConfigManager;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        match error.downcast_ref::<CliError>() {
            Some(cli_error) => eprintln!("{}", cli_error.user_message()),
            None => eprintln!("Error: {:#}", error),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = manager.load().map_err(CliError::from)?;

    logging::init_logging(&config.logging.level, cli.verbose);
    tracing::debug!(config_path = ?manager.config_path(), "Configuration loaded");

    let context = CommandContext::new(config, cli.directory.clone());
    CommandRouter::execute(&cli.command, &context).await?;
    Ok(())
}
