//! OrgTree operator CLI
//!
//! `orgtree tree`, `orgtree role <id>`, `orgtree toggle <id>` and
//! `orgtree move <id> <manager>...` over a JSON directory file, driving the
//! same reorganization session a chart UI would. Collapsed subtrees are kept
//! in a separate view-state file.

pub mod commands;
pub mod error;
pub mod logging;
pub mod router;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
