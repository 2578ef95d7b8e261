//! API Manager payloads

use serde_json::{json, Value};

use super::MockContext;

pub fn list(ctx: &MockContext<'_>) -> Value {
    let env = ctx.arg("environment");
    json!({
        "apis": [
            {
                "id": "12345",
                "name": "Customer API",
                "version": "v1",
                "status": "ACTIVE",
                "endpoint": "https://customer-api.us-e1.cloudhub.io/api/v1",
                "instanceLabel": "customer-api-prod",
                "assetVersion": "1.0.5",
                "environment": env
            },
            {
                "id": "12346",
                "name": "Payment API",
                "version": "v2",
                "status": "ACTIVE",
                "endpoint": "https://payment-processor.us-e1.cloudhub.io/api/v2",
                "instanceLabel": "payment-api-prod",
                "assetVersion": "2.1.3",
                "environment": env
            },
            {
                "id": "12347",
                "name": "Order API",
                "version": "v1",
                "status": "INACTIVE",
                "endpoint": "https://order-fulfillment-api.us-w2.cloudhub.io/api/v1",
                "instanceLabel": "order-api-prod",
                "assetVersion": "1.2.0",
                "environment": env
            }
        ]
    })
}

/// Payment API: slow, failing and alerting
pub fn analytics_degraded(ctx: &MockContext<'_>) -> Value {
    json!({
        "apiId": ctx.arg("api_id"),
        "period": ctx.arg("period"),
        "metrics": {
            "requests": {
                "total": 45230,
                "successful": 42150,
                "failed": 3080,
                "failureRate": "6.8%"
            },
            "responseTime": {
                "average": 1850,
                "p50": 1200,
                "p95": 3500,
                "p99": 5200,
                "unit": "ms"
            },
            "errors": {
                "timeout": 2100,
                "serverError": 650,
                "clientError": 330
            },
            "policies": {
                "rateLimitViolations": 125,
                "authenticationFailures": 45
            },
            "topEndpoints": [
                {"path": "/api/v2/payments/process", "requests": 35000, "avgResponseTime": 2100},
                {"path": "/api/v2/payments/validate", "requests": 8000, "avgResponseTime": 450},
                {"path": "/api/v2/payments/status", "requests": 2230, "avgResponseTime": 180}
            ]
        },
        "alerts": [
            {
                "severity": "HIGH",
                "type": "RESPONSE_TIME_THRESHOLD",
                "message": "Average response time exceeded 1500ms threshold",
                "triggeredAt": "2026-02-14T09:30:00Z"
            },
            {
                "severity": "MEDIUM",
                "type": "ERROR_RATE_THRESHOLD",
                "message": "Error rate exceeded 5% threshold",
                "triggeredAt": "2026-02-14T10:15:00Z"
            }
        ]
    })
}

pub fn analytics_healthy(ctx: &MockContext<'_>) -> Value {
    json!({
        "apiId": ctx.arg("api_id"),
        "period": ctx.arg("period"),
        "metrics": {
            "requests": {
                "total": 12450,
                "successful": 12385,
                "failed": 65,
                "failureRate": "0.5%"
            },
            "responseTime": {
                "average": 245,
                "p50": 180,
                "p95": 450,
                "p99": 680,
                "unit": "ms"
            },
            "errors": {
                "timeout": 15,
                "serverError": 25,
                "clientError": 25
            }
        }
    })
}

pub fn policies(ctx: &MockContext<'_>) -> Value {
    json!({
        "apiId": ctx.arg("api_id"),
        "policies": [
            {
                "policyId": "rate-limiting-1",
                "name": "Rate Limiting",
                "enabled": true,
                "configuration": {
                    "rateLimits": [
                        {"timePeriodInMilliseconds": 60000, "maximumRequests": 1000}
                    ]
                },
                "order": 1
            },
            {
                "policyId": "client-id-enforcement-1",
                "name": "Client ID Enforcement",
                "enabled": true,
                "configuration": {
                    "credentialsOriginHasHttpBasicAuthenticationHeader": "customExpression"
                },
                "order": 2
            },
            {
                "policyId": "spike-control-1",
                "name": "Spike Control",
                "enabled": true,
                "configuration": {
                    "maximumRequests": 100,
                    "timePeriodInMilliseconds": 1000
                },
                "order": 3
            }
        ]
    })
}
