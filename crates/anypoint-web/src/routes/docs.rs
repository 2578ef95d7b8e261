use anypoint_core::config::MOCK_MODE_VAR;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn docs_routes() -> Router<AppState> {
    Router::new().route("/docs", get(api_docs))
}

/// Scheme and host the client used to reach us, as far as the headers tell
fn base_url(headers: &HeaderMap, fallback_host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback_host);

    format!("{}://{}", scheme, host)
}

async fn api_docs(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "title": "MuleSoft MCP Server API",
        "version": state.version,
        "description": "HTTP endpoints for the MuleSoft MCP Server running on Render",
        "base_url": base_url(&headers, &state.listen),
        "endpoints": [
            {
                "path": "/",
                "method": "GET",
                "description": "Health check endpoint",
                "response": "Server status and basic info"
            },
            {
                "path": "/info",
                "method": "GET",
                "description": "Detailed server information",
                "response": "Server details, mode, available scenarios"
            },
            {
                "path": "/scenarios",
                "method": "GET",
                "description": "List all demo scenarios",
                "response": "Available incident scenarios with details"
            },
            {
                "path": "/docs",
                "method": "GET",
                "description": "API documentation",
                "response": "This documentation"
            }
        ],
        "mcp_integration": {
            "note": "This server primarily operates via MCP (Model Context Protocol)",
            "usage": "Configure in Claude Desktop to access full MCP tools",
            "config_example": {
                "mcpServers": {
                    "mulesoft": {
                        "command": "anypoint-mcp",
                        "args": ["serve"],
                        "env": { MOCK_MODE_VAR: "true" }
                    }
                }
            }
        },
        "demo_mode": {
            "enabled": state.mode.is_mock(),
            "description": "Server runs with simulated data - no real MuleSoft connection required"
        }
    }))
}
