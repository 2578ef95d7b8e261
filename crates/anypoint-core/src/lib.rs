//! Anypoint Core - Shared functionality for the Anypoint MCP tools
//!
//! Configuration and the mock/live mode switch, the `anypoint-cli` runner,
//! timestamps, and the demo fleet both binaries describe.

pub mod config;
pub mod fleet;
pub mod logging;
pub mod runner;
pub mod time;

pub use config::{Config, ConfigError, Mode};
pub use runner::{AnypointCli, CommandOutput, CommandRunner, RunnerError};
pub use time::{fixed_clock, iso_timestamp, system_clock, Clock};
