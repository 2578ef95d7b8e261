//! Anypoint MCP Server
//!
//! Exposes MuleSoft Anypoint Platform operations (applications, APIs,
//! diagnostics and incident playbooks) to Claude and other AI assistants via
//! the Model Context Protocol. Tools answer from canned demo data in mock
//! mode and shell out to `anypoint-cli` in live mode.

pub mod handler;
pub mod live;
pub mod mock;
pub mod params;
pub mod protocol;
pub mod server;
pub mod sse;
pub mod tools;

pub use handler::Dispatcher;
pub use server::McpServer;
