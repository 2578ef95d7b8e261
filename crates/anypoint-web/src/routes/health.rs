use anypoint_core::iso_timestamp;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "MuleSoft MCP Server",
        "mode": state.mode.label(),
        "timestamp": iso_timestamp((state.clock)()),
        "version": state.version,
    }))
}
