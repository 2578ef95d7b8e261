//! Logging setup shared by both binaries

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize logging to stderr (stdout is reserved for the stdio MCP protocol).
/// `RUST_LOG` wins over the verbosity count when set.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
