//! Active monitoring alerts

use serde_json::{json, Value};

use super::MockContext;

pub fn active(ctx: &MockContext<'_>) -> Value {
    json!({
        "environment": ctx.arg("environment"),
        "alerts": [
            {
                "id": "alert-1001",
                "severity": "CRITICAL",
                "application": "order-fulfillment-api",
                "type": "APPLICATION_FAILURE",
                "message": "Application failed to start",
                "triggeredAt": "2026-02-14T08:00:00Z",
                "status": "ACTIVE"
            },
            {
                "id": "alert-1002",
                "severity": "HIGH",
                "application": "payment-processor",
                "type": "RESPONSE_TIME_THRESHOLD",
                "message": "Average response time exceeded 1500ms",
                "triggeredAt": "2026-02-14T09:30:00Z",
                "status": "ACTIVE",
                "details": {
                    "threshold": 1500,
                    "current": 2100,
                    "unit": "ms"
                }
            },
            {
                "id": "alert-1003",
                "severity": "MEDIUM",
                "application": "payment-processor",
                "type": "ERROR_RATE_THRESHOLD",
                "message": "Error rate exceeded 5%",
                "triggeredAt": "2026-02-14T10:15:00Z",
                "status": "ACTIVE",
                "details": {
                    "threshold": "5%",
                    "current": "6.8%"
                }
            },
            {
                "id": "alert-1004",
                "severity": "MEDIUM",
                "application": "payment-processor",
                "type": "HIGH_MEMORY_USAGE",
                "message": "Worker memory usage at 71%",
                "triggeredAt": "2026-02-14T10:45:00Z",
                "status": "ACTIVE",
                "worker": "worker-1"
            }
        ],
        "summary": {
            "total": 4,
            "critical": 1,
            "high": 1,
            "medium": 2,
            "low": 0
        }
    })
}
