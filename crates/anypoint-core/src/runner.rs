//! Running the external `anypoint-cli` client
//!
//! Tools talk to the platform through [`CommandRunner`], so the dispatcher can
//! be exercised with a substitute instead of a real process.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::config::CliConfig;

/// Captured result of one CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// The process could not be run to completion
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command timed out after {} seconds", .0.as_secs())]
    TimedOut(Duration),
}

/// Narrow interface to the external client: arguments in, captured streams out.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the client with `args` (the program name is the runner's concern).
    async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError>;
}

/// Runs the real `anypoint-cli` binary
#[derive(Debug, Clone)]
pub struct AnypointCli {
    program: String,
    timeout: Option<Duration>,
}

impl AnypointCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            program: config.program.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for AnypointCli {
    fn default() -> Self {
        Self::from_config(&CliConfig::default())
    }
}

#[async_trait]
impl CommandRunner for AnypointCli {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError> {
        debug!("Running: {} {:?}", self.program, args);

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| RunnerError::TimedOut(limit))?,
            None => cmd.output().await,
        }
        .map_err(|source| RunnerError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}
