//! The simulated application fleet
//!
//! Six CloudHub applications with fixed health. The MCP banner and the
//! `/info` endpoint both describe this table; tool payloads carry their own
//! literal copies.

use serde::Serialize;

/// Application health as shown in the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Health {
    Healthy,
    Degraded,
    Failed,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Healthy => "HEALTHY",
            Health::Degraded => "DEGRADED",
            Health::Failed => "FAILED",
        }
    }
}

/// One demo application
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoApp {
    pub name: &'static str,
    pub status: Health,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<&'static str>,
}

pub const DEMO_FLEET: &[DemoApp] = &[
    DemoApp {
        name: "order-fulfillment-api",
        status: Health::Failed,
        issue: Some("Missing configuration"),
    },
    DemoApp {
        name: "payment-processor",
        status: Health::Degraded,
        issue: Some("High latency, timeouts"),
    },
    DemoApp {
        name: "oauth-authentication-experience-api",
        status: Health::Degraded,
        issue: Some("Cognito timeout (504)"),
    },
    DemoApp {
        name: "cards-sca-business-api",
        status: Health::Degraded,
        issue: Some("OAuth token issues"),
    },
    DemoApp {
        name: "customer-api",
        status: Health::Healthy,
        issue: None,
    },
    DemoApp {
        name: "inventory-sync-service",
        status: Health::Healthy,
        issue: None,
    },
];

/// Look up a demo application by name
pub fn find(name: &str) -> Option<&'static DemoApp> {
    DEMO_FLEET.iter().find(|app| app.name == name)
}
