// CLI error types

use orgtree_config::ConfigError;
use orgtree_domain::DomainError;
use orgtree_reorg::ReorgError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unknown position: {id}")]
    PositionNotFound { id: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory error: {0}")]
    Directory(#[from] DomainError),

    #[error("Reorganization error: {0}")]
    Reorg(#[from] ReorgError),

    #[error("Commit incomplete: {failed} of {attempted} updates failed")]
    CommitIncomplete { failed: usize, attempted: usize },

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'orgtree --help' for usage information.",
                    message
                )
            }
            CliError::PositionNotFound { id } => {
                format!(
                    "No position with id '{}'.\n\nRun 'orgtree tree' to list positions.",
                    id
                )
            }
            CliError::Config(e) => {
                format!(
                    "Configuration error: {}\n\nCheck the config file or ORGTREE_* environment variables.",
                    e
                )
            }
            CliError::Directory(e) => {
                format!("Directory store error: {}\n\nCheck storage.directory_path.", e)
            }
            CliError::Reorg(e) => format!("Reorganization failed: {}", e),
            CliError::CommitIncomplete { failed, attempted } => {
                format!(
                    "{} of {} updates failed. The directory now differs from the requested layout for those positions.\n\nRe-run the failed moves once the store is reachable.",
                    failed, attempted
                )
            }
            CliError::Output(e) => format!("Could not render output: {}", e),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_points_at_help() {
        let error = CliError::invalid_argument("odd number of ids");
        assert!(error.user_message().contains("orgtree --help"));
        assert!(error.to_string().contains("odd number of ids"));
    }

    #[test]
    fn test_domain_errors_convert() {
        let error: CliError = DomainError::position_not_found("x").into();
        assert!(matches!(error, CliError::Directory(_)));
    }
}
