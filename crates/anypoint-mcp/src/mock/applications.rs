//! CloudHub application payloads: listing, details, logs and operations

use serde_json::{json, Value};

use super::MockContext;

pub fn list(ctx: &MockContext<'_>) -> Value {
    let env = ctx.arg("environment");
    json!({
        "applications": [
            {
                "name": "customer-api",
                "status": "STARTED",
                "environment": env,
                "workers": 2,
                "workerType": "MICRO",
                "region": "us-east-1",
                "lastModified": "2026-02-10T14:30:00Z",
                "muleVersion": "4.4.0"
            },
            {
                "name": "payment-processor",
                "status": "STARTED",
                "environment": env,
                "workers": 4,
                "workerType": "SMALL",
                "region": "us-east-1",
                "lastModified": "2026-02-12T09:15:00Z",
                "muleVersion": "4.4.0"
            },
            {
                "name": "order-fulfillment-api",
                "status": "FAILED",
                "environment": env,
                "workers": 2,
                "workerType": "MICRO",
                "region": "us-west-2",
                "lastModified": "2026-02-14T08:00:00Z",
                "muleVersion": "4.3.0",
                "errorMessage": "Application failed to start due to configuration error"
            },
            {
                "name": "inventory-sync-service",
                "status": "STARTED",
                "environment": env,
                "workers": 1,
                "workerType": "MICRO",
                "region": "us-east-1",
                "lastModified": "2026-01-28T11:20:00Z",
                "muleVersion": "4.4.0"
            },
            {
                "name": "oauth-authentication-experience-api",
                "status": "STARTED",
                "environment": env,
                "workers": 2,
                "workerType": "SMALL",
                "region": "us-east-1",
                "lastModified": "2026-02-14T18:35:00Z",
                "muleVersion": "4.4.0",
                "statusReason": "High error rate - 504 Gateway Timeout from downstream Cognito"
            },
            {
                "name": "cards-sca-business-api",
                "status": "STARTED",
                "environment": env,
                "workers": 3,
                "workerType": "MICRO",
                "region": "us-east-1",
                "lastModified": "2026-02-10T09:00:00Z",
                "muleVersion": "4.4.0",
                "statusReason": "Experiencing intermittent failures due to OAuth token issues"
            }
        ],
        "total": 6
    })
}

/// Shared body of `describe_application`; error fields go last.
fn describe(ctx: &MockContext<'_>, status: &str, error_info: Value) -> Value {
    let name = ctx.args.text("app_name");
    let mut application = json!({
        "name": name,
        "status": status,
        "environment": ctx.arg("environment"),
        "domain": format!("{}.us-e1.cloudhub.io", name),
        "workers": {
            "amount": 2,
            "type": {
                "name": "MICRO",
                "weight": 0.1,
                "cpu": "0.1 vCores",
                "memory": "500 MB"
            }
        },
        "region": "us-east-1",
        "muleVersion": "4.4.0",
        "lastModified": "2026-02-14T08:00:00Z",
        "properties": {
            "http.port": "8081",
            "anypoint.platform.client_id": "***masked***",
            "anypoint.platform.client_secret": "***masked***"
        },
        "runtime": {
            "javaVersion": "1.8.0_345",
            "staticIpsEnabled": false,
            "persistentQueues": true
        }
    });

    if let (Some(target), Value::Object(extra)) = (application.as_object_mut(), error_info) {
        target.extend(extra);
    }

    json!({ "application": application })
}

pub fn describe_failed(ctx: &MockContext<'_>) -> Value {
    describe(
        ctx,
        "FAILED",
        json!({
            "errorMessage": "Application failed to start",
            "errorDetails": "Configuration property 'db.host' is missing",
            "lastDeployment": {
                "status": "FAILED",
                "timestamp": "2026-02-14T08:00:00Z",
                "deployedBy": "admin@company.com"
            }
        }),
    )
}

pub fn describe_started(ctx: &MockContext<'_>) -> Value {
    describe(ctx, "STARTED", json!({}))
}

fn logs(ctx: &MockContext<'_>, lines: &[&str]) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "logLines": lines,
        "timestamp": ctx.timestamp
    })
}

pub fn logs_oauth(ctx: &MockContext<'_>) -> Value {
    logs(
        ctx,
        &[
            "2024-09-06T18:35:07.628Z INFO [[MuleRuntime].uber.15: [oauth-authentication-experience-api].oauth-authentication-exp-11ef-8a7b-0ab70e1f9a09] org.mule.runtime.core.internal.processor.LoggerMessageProcessor: {",
            r#"  "Correlation ID": "8feb64fb-ce26-42b9-a37c-1d0774cba23d","#,
            r#"  "Transaction ID": "8feb64fb-ce26-42b9-a37c-1d0774cba23d","#,
            r#"  "Application Name": "API Gateway OAuth2 Experience API","#,
            r#"  "Date Time Stamp": "2024-09-06T18:35:07.628Z","#,
            r#"  "type": "ERROR","#,
            r#"  "status_code": 504,"#,
            r#"  "action": "ERROR RESPONSE SENT","#,
            r#"  "Headers": {"#,
            r#"    "x-api-transaction-id": "ca1b58b2-c34f-4af2-9bf2-fe247f13c56e","#,
            r#"    "x-api-correlation-id": "5bcfadd8-919a-4d76-8b43-44ddbaa061e9","#,
            r#"    "x-ratelimit-remaining": "24","#,
            r#"    "x-ratelimit-limit": "25","#,
            r#"    "x-ratelimit-reset": "857""#,
            "  }",
            "}",
            "2024-09-06T18:35:08.145Z ERROR Cognito System API returned timeout after 5000ms",
            "2024-09-06T18:35:08.146Z WARN Rate limit approaching - 24 of 25 requests remaining",
            "2024-09-06T18:36:12.334Z ERROR [[MuleRuntime].uber.15] Gateway timeout - Unable to obtain access token from Cognito",
            "2024-09-06T18:36:12.335Z ERROR Cards SCA authentication flow failed - access token generation timeout",
            "2024-09-06T18:37:45.221Z INFO Retry attempt 1/3 for access token generation",
            "2024-09-06T18:37:50.445Z ERROR Retry failed - Cognito System API still timing out",
        ],
    )
}

pub fn logs_cards_sca(ctx: &MockContext<'_>) -> Value {
    logs(
        ctx,
        &[
            "2024-09-06T18:34:00.123Z INFO Processing Cards SCA eCommerce transaction request",
            "2024-09-06T18:34:00.450Z INFO Calling OAuth authentication experience API for token",
            "2024-09-06T18:34:05.678Z ERROR OAuth API returned 504 - Gateway Timeout",
            "2024-09-06T18:34:05.679Z ERROR Unable to authenticate user - access token unavailable",
            "2024-09-06T18:34:05.680Z WARN Transaction failed - returning error to customer",
            "2024-09-06T18:35:30.123Z INFO Retry transaction attempt",
            "2024-09-06T18:35:35.890Z ERROR OAuth API still failing - 504 Gateway Timeout",
            "2024-09-06T18:36:00.234Z WARN Failure rate increased to 12% in last 30 minutes",
            "2024-09-06T18:36:00.235Z ERROR Customer impact: Unable to process debit card transaction",
            "2024-09-06T18:36:00.236Z ERROR Customer impact: Unable to process credit card transaction",
        ],
    )
}

pub fn logs_order_fulfillment(ctx: &MockContext<'_>) -> Value {
    logs(
        ctx,
        &[
            "2026-02-14 08:00:15 ERROR [main] org.mule.runtime.core.internal.context.DefaultMuleContext: Error starting application",
            "2026-02-14 08:00:15 ERROR [main] org.mule.runtime.module.deployment.impl.DefaultApplicationDeployer: Failed to deploy application",
            "2026-02-14 08:00:15 ERROR [main] Configuration property 'db.host' is required but not set",
            "2026-02-14 08:00:15 FATAL [main] Application startup failed",
            "2026-02-14 08:00:16 INFO  [main] org.mule.runtime.module.deployment.impl.DefaultApplicationDeployer: Application deployment failed: order-fulfillment-api",
        ],
    )
}

pub fn logs_payment(ctx: &MockContext<'_>) -> Value {
    logs(
        ctx,
        &[
            "2026-02-14 10:15:23 INFO  [http-listener-1] Received payment request ID: pay-12345",
            "2026-02-14 10:15:24 WARN  [http-listener-1] Payment gateway response time: 2500ms (threshold: 2000ms)",
            "2026-02-14 10:15:24 INFO  [http-listener-1] Payment processed successfully: pay-12345",
            "2026-02-14 10:16:05 ERROR [http-listener-2] Payment gateway timeout after 5000ms",
            "2026-02-14 10:16:05 ERROR [http-listener-2] Retrying payment request: pay-12346",
            "2026-02-14 10:16:08 INFO  [http-listener-2] Payment retry successful: pay-12346",
            "2026-02-14 10:17:12 WARN  [scheduler-1] Database connection pool: 8/10 connections in use",
        ],
    )
}

pub fn logs_generic(ctx: &MockContext<'_>) -> Value {
    logs(
        ctx,
        &[
            "2026-02-14 10:20:00 INFO  [http-listener-1] Processing request",
            "2026-02-14 10:20:01 INFO  [http-listener-1] Request completed successfully",
            "2026-02-14 10:21:15 INFO  [scheduler-1] Scheduled task executed",
        ],
    )
}

pub fn restart(ctx: &MockContext<'_>) -> Value {
    json!({
        "status": "RESTARTING",
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "message": format!("Restart initiated for application {}", ctx.args.text("app_name")),
        "estimatedTime": "2-3 minutes",
        "timestamp": ctx.timestamp
    })
}

pub fn deploy(ctx: &MockContext<'_>) -> Value {
    json!({
        "status": "DEPLOYING",
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "workers": ctx.arg("workers"),
        "workerType": ctx.arg("worker_type"),
        "message": format!("Deployment initiated for {}", ctx.args.text("app_name")),
        "estimatedTime": "3-5 minutes",
        "timestamp": ctx.timestamp
    })
}

/// The properties argument has to be a JSON document; it is echoed back parsed.
pub fn update_properties(ctx: &MockContext<'_>) -> Value {
    match serde_json::from_str::<Value>(&ctx.args.text("properties")) {
        Ok(properties) => json!({
            "status": "UPDATING",
            "applicationName": ctx.arg("app_name"),
            "environment": ctx.arg("environment"),
            "updatedProperties": properties,
            "message": "Configuration update initiated - application will restart",
            "timestamp": ctx.timestamp
        }),
        Err(_) => json!({ "error": "Invalid JSON format for properties" }),
    }
}

pub fn scale(ctx: &MockContext<'_>) -> Value {
    json!({
        "status": "SCALING",
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "currentWorkers": 2,
        "targetWorkers": ctx.arg("workers"),
        "message": format!("Scaling application to {} workers", ctx.args.text("workers")),
        "estimatedTime": "2-4 minutes",
        "timestamp": ctx.timestamp
    })
}

pub fn clear_queues(ctx: &MockContext<'_>) -> Value {
    json!({
        "status": "CLEARING",
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "message": "Persistent queues are being cleared",
        "queueStats": {
            "messagesBefore": 1247,
            "messagesCleared": 1247
        },
        "timestamp": ctx.timestamp
    })
}

pub fn custom_command(ctx: &MockContext<'_>) -> Value {
    json!({
        "message": "Mock mode enabled - command not executed",
        "command": ctx.arg("command"),
        "note": "Set MULESOFT_MOCK_MODE=false to execute real commands"
    })
}
