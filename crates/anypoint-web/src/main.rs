//! Anypoint Web
//!
//! HTTP wrapper that lets the MCP demo run on Render.com and similar
//! HTTP-based platforms.

use std::path::PathBuf;

use anyhow::{Context, Result};
use anypoint_core::config::Config;
use anypoint_core::logging::init_logging;
use anypoint_web::{start_server, AppState};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "anypoint-web")]
#[command(about = "Health, info and scenario endpoints for the Anypoint MCP demo")]
#[command(version)]
#[command(after_help = "\
ENVIRONMENT:
    MULESOFT_MOCK_MODE   'true' for mock mode, anything else for live
    PORT                 Listen port (default 10000)

For full MCP functionality, point Claude Desktop at anypoint-mcp.")]
struct Cli {
    /// Config file (default: ~/.config/anypoint-mcp/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config =
        Config::from_env(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    info!("MuleSoft MCP Server - HTTP Wrapper");
    info!("Mode: {}", config.mode().describe());
    info!("Port: {}", config.web.port);

    start_server(AppState::from_config(&config))
        .await
        .context("Web server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["anypoint-web", "--host", "127.0.0.1", "-p", "8080", "-v"]);
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.verbose, 1);
    }
}
