//! Anypoint MCP Server
//!
//! Exposes MuleSoft Anypoint Platform tools to Claude and other AI assistants
//! via the Model Context Protocol (MCP).
//!
//! Usage:
//!   anypoint-mcp                      # stdio transport
//!   anypoint-mcp serve --transport sse
//!   anypoint-mcp tools
//!   anypoint-mcp call describe_application --app_name order-fulfillment-api

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use anypoint_core::config::Config;
use anypoint_core::fleet::DEMO_FLEET;
use anypoint_core::logging::init_logging;
use anypoint_core::{AnypointCli, Mode};
use anypoint_mcp::{sse, Dispatcher, McpServer};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use tracing::info;

#[derive(Parser)]
#[command(name = "anypoint-mcp")]
#[command(about = "MCP server for MuleSoft Anypoint Platform incident management")]
#[command(version)]
#[command(after_help = "\
Mock mode (the default) answers every tool from a simulated fleet of six
applications, including a live Cards SCA incident. Live mode runs anypoint-cli.

ENVIRONMENT:
    MULESOFT_MOCK_MODE   'true' for mock mode, anything else for live
    PORT                 Listen port for the SSE transport

EXAMPLES:
    anypoint-mcp                                  # stdio, for Claude Desktop
    anypoint-mcp serve --transport sse --port 8000
    anypoint-mcp tools --json
    anypoint-mcp call get_application_health --app_name payment-processor
    anypoint-mcp --mode live call list_apis --args '{\"environment\": \"Sandbox\"}'")]
struct Cli {
    /// Config file (default: ~/.config/anypoint-mcp/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer from demo data or from anypoint-cli (overrides MULESOFT_MOCK_MODE)
    #[arg(long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// Path to the anypoint-cli executable
    #[arg(long, global = true)]
    cli_path: Option<String>,

    /// Give up on an anypoint-cli call after this many seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Mock,
    Live,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Mock => Mode::Mock,
            ModeArg::Live => Mode::Live,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum Transport {
    #[default]
    Stdio,
    Sse,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server (default)
    Serve {
        /// Transport to speak MCP over
        #[arg(long, value_enum, default_value_t = Transport::Stdio)]
        transport: Transport,

        /// Bind address for the SSE transport
        #[arg(long)]
        host: Option<String>,

        /// Port for the SSE transport
        #[arg(long)]
        port: Option<u16>,
    },

    /// List the available tools
    Tools {
        /// Output the MCP definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Call one tool and print its output
    Call {
        /// Tool name
        tool: String,

        /// Arguments as a JSON object
        #[arg(long)]
        args: Option<String>,

        /// Tool arguments in --key value format
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the protocol, logs go to stderr
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let dispatcher = Arc::new(dispatcher(&config));

    match cli.command.unwrap_or(Commands::Serve {
        transport: Transport::default(),
        host: None,
        port: None,
    }) {
        Commands::Serve {
            transport,
            host,
            port,
        } => cmd_serve(config, dispatcher, transport, host, port).await,
        Commands::Tools { json } => cmd_tools(&dispatcher, json),
        Commands::Call { tool, args, params } => {
            cmd_call(&dispatcher, &tool, args.as_deref(), &params).await
        }
    }
}

/// Defaults, config file, environment, then flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(mode) = cli.mode {
        config.set_mode(mode.into());
    }
    if let Some(path) = &cli.cli_path {
        config.cli.program = path.clone();
    }
    if cli.timeout.is_some() {
        config.cli.timeout_secs = cli.timeout;
    }

    Ok(config)
}

fn dispatcher(config: &Config) -> Dispatcher {
    let runner = Arc::new(AnypointCli::from_config(&config.cli));
    Dispatcher::new(config.mode(), runner)
}

async fn cmd_serve(
    mut config: Config,
    dispatcher: Arc<Dispatcher>,
    transport: Transport,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.mcp.host = host;
    }
    if let Some(port) = port {
        config.mcp.port = port;
    }

    log_banner(&config);

    let server = McpServer::new(dispatcher);
    match transport {
        Transport::Stdio => {
            info!("Transport: stdio");
            server.run().await
        }
        Transport::Sse => {
            info!("Transport: SSE (Server-Sent Events)");
            sse::serve(Arc::new(server), &config.mcp.addr()).await
        }
    }
}

fn log_banner(config: &Config) {
    let mode = config.mode();
    info!("MuleSoft Anypoint Platform MCP Server");
    info!("Mode: {}", mode.describe());

    match mode {
        Mode::Mock => {
            info!("Running with simulated MuleSoft responses; no Anypoint Platform connection required");
            for (i, app) in DEMO_FLEET.iter().enumerate() {
                match app.issue {
                    Some(issue) => info!("  {}. {}: {} ({})", i + 1, app.name, app.status.as_str(), issue),
                    None => info!("  {}. {}: {}", i + 1, app.name, app.status.as_str()),
                }
            }
            info!("Featured incident: Cards SCA Access Token Issues");
            info!("  Root cause: AWS Cognito System API timeouts (504), error rate 12% (threshold 10%)");
            info!("  Customer impact: 83 failed transactions, ~500 users affected");
            info!("  Try: diagnose_cards_sca_issue");
        }
        Mode::Live => {
            info!("Will connect to the real Anypoint Platform");
            info!("Ensure {} is installed and configured", config.cli.program);
        }
    }
}

fn cmd_tools(dispatcher: &Dispatcher, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&dispatcher.definitions())?);
        return Ok(());
    }

    for tool in dispatcher.tools() {
        let params: Vec<String> = tool
            .params
            .iter()
            .map(|p| {
                if p.is_required() {
                    p.name.to_string()
                } else {
                    format!("[{}]", p.name)
                }
            })
            .collect();
        println!("{:<34} {}", tool.name, params.join(" "));
        println!("{:<34} {}", "", tool.description);
    }

    Ok(())
}

async fn cmd_call(
    dispatcher: &Dispatcher,
    tool: &str,
    json_args: Option<&str>,
    params: &[String],
) -> Result<()> {
    let mut arguments = match json_args {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("Invalid --args JSON")? {
            Value::Object(map) => map,
            _ => bail!("--args must be a JSON object"),
        },
        None => Map::new(),
    };
    arguments.extend(parse_arguments(params)?);

    let result = dispatcher.call(tool, &arguments).await;
    if result.is_error {
        bail!("{}", result.text());
    }

    println!("{}", result.text());
    Ok(())
}

/// Parse `--key value` / `--key=value` pairs into tool arguments
fn parse_arguments(args: &[String]) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    let mut i = 0;

    while i < args.len() {
        let Some(key) = args[i].strip_prefix("--") else {
            bail!("Unexpected argument '{}', expected --key value", args[i]);
        };

        if let Some((k, v)) = key.split_once('=') {
            result.insert(k.to_string(), Value::String(v.to_string()));
        } else if i + 1 < args.len() && !args[i + 1].starts_with("--") {
            i += 1;
            result.insert(key.to_string(), Value::String(args[i].clone()));
        } else {
            bail!("Missing value for --{}", key);
        }
        i += 1;
    }

    Ok(result)
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
    fn test_default_command_is_serve() {
        let cli = Cli::parse_from(["anypoint-mcp", "--mode", "live", "-vv"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.mode, Some(ModeArg::Live)));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_call_flags() {
        let cli = Cli::parse_from([
            "anypoint-mcp",
            "call",
            "scale_application",
            "--args",
            r#"{"app_name": "payment-processor", "workers": 4}"#,
        ]);
        match cli.command {
            Some(Commands::Call { tool, args, params }) => {
                assert_eq!(tool, "scale_application");
                assert!(args.unwrap().contains("payment-processor"));
                assert!(params.is_empty());
            }
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn test_parse_arguments() {
        let args = vec![
            "--app_name".to_string(),
            "payment-processor".to_string(),
            "--environment=Staging".to_string(),
        ];
        let result = parse_arguments(&args).unwrap();
        assert_eq!(result["app_name"], "payment-processor");
        assert_eq!(result["environment"], "Staging");

        assert!(parse_arguments(&["--app_name".to_string()]).is_err());
        assert!(parse_arguments(&["payment-processor".to_string()]).is_err());
    }
}
