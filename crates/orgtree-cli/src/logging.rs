// Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins, then `-v`, then the configured level
pub fn env_filter(configured_level: &str, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose { "debug" } else { configured_level };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, writing to stderr so command output stays clean
pub fn init_logging(configured_level: &str, verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(configured_level, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
