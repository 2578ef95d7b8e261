//! Health checks, worker diagnostics and per-application troubleshooting

use serde_json::{json, Value};

use super::MockContext;

pub fn health_degraded(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "overallHealth": "DEGRADED",
        "timestamp": ctx.timestamp,
        "checks": {
            "applicationStatus": {
                "status": "HEALTHY",
                "message": "Application is running"
            },
            "workerHealth": {
                "status": "HEALTHY",
                "workers": [
                    {"id": "worker-0", "status": "STARTED", "cpu": "45%", "memory": "68%"},
                    {"id": "worker-1", "status": "STARTED", "cpu": "52%", "memory": "71%"}
                ]
            },
            "responseTime": {
                "status": "DEGRADED",
                "averageMs": 2100,
                "threshold": 1500,
                "message": "Response time exceeds acceptable threshold"
            },
            "errorRate": {
                "status": "DEGRADED",
                "rate": "6.8%",
                "threshold": "5%",
                "message": "Error rate above acceptable threshold"
            },
            "connectivity": {
                "status": "DEGRADED",
                "checks": [
                    {
                        "name": "Payment Gateway",
                        "status": "DEGRADED",
                        "latency": 2500,
                        "message": "High latency detected"
                    },
                    {
                        "name": "Database",
                        "status": "HEALTHY",
                        "latency": 45
                    }
                ]
            }
        },
        "recommendations": [
            "Investigate payment gateway latency issues",
            "Review error logs for timeout patterns",
            "Consider scaling workers if load continues"
        ]
    })
}

pub fn health_critical(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "overallHealth": "CRITICAL",
        "timestamp": ctx.timestamp,
        "checks": {
            "applicationStatus": {
                "status": "FAILED",
                "message": "Application failed to start",
                "error": "Configuration property 'db.host' is missing"
            },
            "workerHealth": {
                "status": "FAILED",
                "workers": []
            }
        },
        "recommendations": [
            "Add missing configuration property 'db.host'",
            "Redeploy application after fixing configuration"
        ]
    })
}

pub fn health_ok(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "overallHealth": "HEALTHY",
        "timestamp": ctx.timestamp,
        "checks": {
            "applicationStatus": {"status": "HEALTHY"},
            "workerHealth": {"status": "HEALTHY"},
            "responseTime": {"status": "HEALTHY", "averageMs": 245},
            "errorRate": {"status": "HEALTHY", "rate": "0.5%"}
        }
    })
}

pub fn worker(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "workerId": ctx.arg("worker_id"),
        "environment": ctx.arg("environment"),
        "diagnostics": {
            "status": "STARTED",
            "uptime": "3d 14h 23m",
            "resources": {
                "cpu": {
                    "current": "52%",
                    "average1m": "48%",
                    "average5m": "45%",
                    "average15m": "43%"
                },
                "memory": {
                    "used": "356 MB",
                    "total": "500 MB",
                    "percentage": "71%",
                    "heapUsed": "280 MB",
                    "heapMax": "400 MB"
                },
                "threads": {
                    "total": 45,
                    "active": 12,
                    "waiting": 33
                }
            },
            "jvm": {
                "version": "1.8.0_345",
                "vendor": "Oracle Corporation",
                "gcCount": 1523,
                "gcTime": "12.5s"
            },
            "networking": {
                "activeConnections": 24,
                "requestsPerSecond": 15.3,
                "bytesIn": "1.2 GB",
                "bytesOut": "2.8 GB"
            },
            "issues": [
                {
                    "severity": "MEDIUM",
                    "type": "HIGH_MEMORY_USAGE",
                    "message": "Memory usage at 71% - approaching threshold",
                    "recommendation": "Monitor memory usage and consider increasing worker size if sustained"
                }
            ]
        }
    })
}

/// Root cause and the tool calls that would fix it. The steps are advice only.
pub fn failure_missing_config(ctx: &MockContext<'_>) -> Value {
    let app = ctx.arg("app_name");
    json!({
        "applicationName": app,
        "environment": ctx.arg("environment"),
        "diagnosis": {
            "rootCause": "MISSING_CONFIGURATION",
            "details": "Required configuration property 'db.host' is not set",
            "impact": "Application unable to start - service unavailable",
            "affectedUsers": "All users attempting to access order fulfillment service"
        },
        "timeline": [
            {
                "timestamp": "2026-02-14T07:55:00Z",
                "event": "Deployment initiated",
                "user": "admin@company.com"
            },
            {
                "timestamp": "2026-02-14T07:58:00Z",
                "event": "Configuration validation failed"
            },
            {
                "timestamp": "2026-02-14T08:00:00Z",
                "event": "Application startup failed"
            }
        ],
        "logs": [
            "ERROR: Configuration property 'db.host' is required but not set",
            "FATAL: Application startup failed",
            "INFO: Application deployment failed: order-fulfillment-api"
        ],
        "remediationSteps": [
            {
                "step": 1,
                "action": "Add missing configuration property",
                "command": "update_application_properties",
                "parameters": {
                    "app_name": app,
                    "properties": r#"{"db.host": "production-db.company.com", "db.port": "5432"}"#
                }
            },
            {
                "step": 2,
                "action": "Restart application",
                "command": "restart_application",
                "parameters": {
                    "app_name": app
                }
            },
            {
                "step": 3,
                "action": "Verify application health",
                "command": "get_application_health",
                "parameters": {
                    "app_name": app
                }
            }
        ],
        "preventionRecommendations": [
            "Implement configuration validation in CI/CD pipeline",
            "Use environment-specific configuration management",
            "Add pre-deployment smoke tests"
        ]
    })
}

pub fn failure_none(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "message": "No critical failures detected for this application"
    })
}

pub fn performance_poor(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "performanceAnalysis": {
            "overallRating": "POOR",
            "issues": [
                {
                    "type": "HIGH_RESPONSE_TIME",
                    "severity": "HIGH",
                    "metric": "Average response time: 2100ms",
                    "threshold": "1500ms",
                    "deviation": "+40%"
                },
                {
                    "type": "BACKEND_LATENCY",
                    "severity": "HIGH",
                    "metric": "Payment gateway latency: 2500ms",
                    "expectedRange": "500-1000ms",
                    "deviation": "+150%"
                },
                {
                    "type": "ERROR_RATE",
                    "severity": "MEDIUM",
                    "metric": "Error rate: 6.8%",
                    "threshold": "5%",
                    "primaryError": "Gateway timeout (68% of errors)"
                }
            ],
            "bottlenecks": [
                {
                    "component": "Payment Gateway Integration",
                    "impact": "High",
                    "description": "External payment gateway showing high latency and timeout rate",
                    "affectedEndpoints": ["/api/v2/payments/process", "/api/v2/payments/validate"]
                },
                {
                    "component": "Database Connection Pool",
                    "impact": "Medium",
                    "description": "Connection pool utilization at 80%",
                    "recommendation": "Increase pool size or optimize queries"
                }
            ],
            "recommendations": performance_recommendations()
        },
        "metrics": {
            "responseTime": {
                "current": 2100,
                "target": 1500,
                "p95": 3500,
                "p99": 5200
            },
            "throughput": {
                "requestsPerSecond": 12.5,
                "peakRequestsPerSecond": 28.3
            },
            "resources": {
                "cpuAverage": "48%",
                "memoryAverage": "69%",
                "workerUtilization": "High"
            }
        }
    })
}

fn performance_recommendations() -> Value {
    json!([
        {
            "priority": "HIGH",
            "category": "External Integration",
            "recommendation": "Implement circuit breaker pattern for payment gateway",
            "expectedImpact": "Reduce timeout errors by 60-80%",
            "effort": "Medium"
        },
        {
            "priority": "HIGH",
            "category": "External Integration",
            "recommendation": "Add request timeout configuration (3s max)",
            "expectedImpact": "Prevent long-running requests from blocking workers",
            "effort": "Low"
        },
        {
            "priority": "MEDIUM",
            "category": "Caching",
            "recommendation": "Implement response caching for validation endpoints",
            "expectedImpact": "Reduce load by 30-40%",
            "effort": "Medium"
        },
        {
            "priority": "MEDIUM",
            "category": "Scaling",
            "recommendation": "Scale from 2 to 4 workers during peak hours",
            "expectedImpact": "Improve throughput and reduce queue times",
            "effort": "Low"
        },
        {
            "priority": "LOW",
            "category": "Database",
            "recommendation": "Increase database connection pool size",
            "expectedImpact": "Reduce connection wait times",
            "effort": "Low"
        }
    ])
}

pub fn performance_good(ctx: &MockContext<'_>) -> Value {
    json!({
        "applicationName": ctx.arg("app_name"),
        "environment": ctx.arg("environment"),
        "performanceAnalysis": {
            "overallRating": "GOOD",
            "message": "No significant performance issues detected"
        }
    })
}
