use anypoint_core::fleet::DEMO_FLEET;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::{AppState, Result};

pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(server_info))
        .route("/scenarios", get(scenarios))
}

async fn server_info(State(state): State<AppState>) -> Result<Json<Value>> {
    let scenarios = serde_json::to_value(DEMO_FLEET)?;

    Ok(Json(json!({
        "server": "MuleSoft Anypoint Platform MCP Server",
        "description": "AI-powered incident management for MuleSoft",
        "mode": state.mode_flag,
        "scenarios": scenarios,
        "endpoints": {
            "/": "Health check",
            "/info": "Server information",
            "/scenarios": "List available demo scenarios",
            "/docs": "API documentation"
        }
    })))
}

// Query parameters are accepted and ignored.
async fn scenarios() -> Json<Value> {
    Json(json!({
        "scenarios": {
            "cards-sca": {
                "title": "Cards SCA Access Token Issues",
                "severity": "P2",
                "service": "Cards SCA",
                "impact": "Users unable to perform eCommerce transactions",
                "root_cause": "AWS Cognito System API timeout (504)",
                "error_rate": "12%",
                "affected_users": "~500",
                "failed_transactions": 83
            },
            "order-fulfillment": {
                "title": "Order Fulfillment API Failure",
                "severity": "P1",
                "service": "Order Fulfillment",
                "impact": "Complete service outage",
                "root_cause": "Missing configuration property 'db.host'",
                "status": "FAILED"
            },
            "payment-performance": {
                "title": "Payment Processor Performance Degradation",
                "severity": "P2",
                "service": "Payment Processing",
                "impact": "Slow transaction processing",
                "root_cause": "Payment gateway latency",
                "response_time": "2100ms (threshold: 1500ms)",
                "error_rate": "6.8%"
            }
        },
        "note": "Use MCP protocol to interact with these scenarios via Claude Desktop"
    }))
}
