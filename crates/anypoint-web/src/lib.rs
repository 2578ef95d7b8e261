//! Anypoint Web - informational HTTP endpoints
//!
//! Hosting platforms such as Render expect an HTTP port to probe. This crate
//! answers with health, server info, the demo scenarios and a short API
//! description. Tool calls themselves go through `anypoint-mcp`.

pub mod routes;
pub mod server;

mod error;
mod state;

pub use error::{Result, WebError};
pub use server::{app, start_server};
pub use state::AppState;
