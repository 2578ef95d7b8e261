//! Configuration management for the Anypoint MCP tools
//!
//! Defaults, then an optional JSON file, then the environment. Command-line
//! flags are layered on top by each binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment flag selecting canned payloads ("true") or the real CLI.
pub const MOCK_MODE_VAR: &str = "MULESOFT_MOCK_MODE";

/// Listen port set by Render and similar hosts.
pub const PORT_VAR: &str = "PORT";

/// Errors raised while resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {var} value '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Whether tools answer from canned payloads or from `anypoint-cli`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Mock,
    Live,
}

impl Mode {
    /// Interpret the raw flag: only "true" (any case) selects mock mode.
    pub fn from_flag(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("true") {
            Mode::Mock
        } else {
            Mode::Live
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Mode::Mock)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Mock => "MOCK",
            Mode::Live => "LIVE",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Mode::Mock => "MOCK (Demo)",
            Mode::Live => "LIVE (Real Anypoint Platform)",
        }
    }
}

/// How to reach the external `anypoint-cli` client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Program name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Upper bound on a single invocation; unbounded when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_program() -> String {
    "anypoint-cli".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout_secs: None,
        }
    }
}

/// A host/port pair a server binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ListenConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_mcp_listen() -> ListenConfig {
    ListenConfig {
        host: default_host(),
        port: 8000,
    }
}

fn default_web_listen() -> ListenConfig {
    ListenConfig {
        host: default_host(),
        port: 10000,
    }
}

fn default_mock_mode() -> bool {
    true
}

/// Resolved configuration shared by both binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Serve canned payloads instead of calling the CLI
    #[serde(default = "default_mock_mode")]
    pub mock_mode: bool,

    #[serde(default)]
    pub cli: CliConfig,

    /// SSE transport listener for the MCP server
    #[serde(default = "default_mcp_listen")]
    pub mcp: ListenConfig,

    /// Info endpoint listener
    #[serde(default = "default_web_listen")]
    pub web: ListenConfig,

    /// Raw mode flag as it was given, reported by `/info`
    #[serde(skip)]
    mode_flag: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mock_mode: default_mock_mode(),
            cli: CliConfig::default(),
            mcp: default_mcp_listen(),
            web: default_web_listen(),
            mode_flag: None,
        }
    }
}

impl Config {
    /// Default config file location (~/.config/anypoint-mcp/config.json)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("anypoint-mcp")
            .join("config.json")
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file (explicit or default location) and apply the process environment.
    pub fn from_env(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn resolve<F>(explicit: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let mut config = Self::load(&path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Overlay `MULESOFT_MOCK_MODE` and `PORT`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MOCK_MODE_VAR) {
            self.mock_mode = Mode::from_flag(&raw).is_mock();
            self.mode_flag = Some(raw);
        }

        if let Some(raw) = lookup(PORT_VAR) {
            let port = raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value: raw.clone(),
            })?;
            self.mcp.port = port;
            self.web.port = port;
        }

        Ok(())
    }

    /// Force a mode, e.g. from a command-line flag
    pub fn set_mode(&mut self, mode: Mode) {
        self.mock_mode = mode.is_mock();
        self.mode_flag = Some(self.mock_mode.to_string());
    }

    pub fn mode(&self) -> Mode {
        if self.mock_mode {
            Mode::Mock
        } else {
            Mode::Live
        }
    }

    pub fn mode_flag(&self) -> String {
        self.mode_flag
            .clone()
            .unwrap_or_else(|| self.mock_mode.to_string())
    }
}
