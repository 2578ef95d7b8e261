//! The featured incident: Cards SCA access token failures
//!
//! A P2 playbook walk-through. Cognito timeouts make the OAuth experience API
//! return 504s, which breaks authentication for card transactions.

use serde_json::{json, Value};

use super::MockContext;

pub fn cards_sca(_ctx: &MockContext<'_>) -> Value {
    json!({
        "incident": {
            "title": "Cards SCA Access Token Issues",
            "severity": "P2",
            "serviceImpacted": "Cards SCA",
            "customerImpact": "Users unable to perform eCommerce transactions",
            "startTime": "2024-09-06T18:30:00Z",
            "duration": "45 minutes (ongoing)"
        },
        "rootCause": {
            "primaryIssue": "AWS Cognito System API timeout",
            "secondaryIssue": "OAuth authentication experience API returning 504 errors",
            "affectedComponents": [
                "oauth-authentication-experience-api",
                "cards-sca-business-api",
                "cognito-system-api (external)"
            ]
        },
        "metrics": metrics(),
        "diagnosticChecks": diagnostic_checks(),
        "testTransactions": {
            "debitTests": {
                "attempted": 5,
                "successful": 0,
                "failed": 5,
                "errorMessage": "Unable to authenticate - access token unavailable"
            },
            "creditTests": {
                "attempted": 5,
                "successful": 1,
                "failed": 4,
                "errorMessage": "504 Gateway Timeout from OAuth API"
            }
        },
        "timeline": timeline(),
        "remediationSteps": remediation_steps(),
        "p3TicketCriteria": {
            "scenario1": {
                "condition": "Spike occurs and resolves",
                "action": "Create P3 to analyze what happened",
                "preventive": true
            },
            "scenario2": {
                "condition": "Errors continuously coming",
                "action": "Create P3 to quickly investigate",
                "reactive": true,
                "current": "THIS SCENARIO - ERRORS ONGOING"
            }
        },
        "recommendations": recommendations(),
        "monitoringAlerts": monitoring_alerts(),
        "customerImpact": {
            "affectedUsers": "~500 users (estimated based on failed transactions)",
            "affectedTransactions": 83,
            "revenueImpact": "~$12,450 in failed transactions",
            "customerExperience": "Unable to complete purchases - authentication failures",
            "duration": "45 minutes (ongoing)"
        }
    })
}

fn metrics() -> Value {
    json!({
        "errorRate": {
            "current": "12%",
            "threshold": "10%",
            "status": "CRITICAL"
        },
        "responseTime": {
            "oauth-api": {
                "p50": "5200ms",
                "p95": "timeout (>5000ms)",
                "expected": "500-800ms"
            }
        },
        "failedTransactions": {
            "debit": 45,
            "credit": 38,
            "total": 83,
            "last30min": true
        },
        "rateLimiting": {
            "remaining": 24,
            "limit": 25,
            "resetIn": "857 seconds",
            "status": "OK"
        }
    })
}

fn diagnostic_checks() -> Value {
    json!({
        "cognitoSystemAPI": {
            "status": "DEGRADED",
            "responseTime": "5000ms+ (timeout)",
            "errorType": "Gateway Timeout",
            "recommendation": "Escalate to AWS Cognito team"
        },
        "oauthExperienceAPI": {
            "status": "DEGRADED",
            "health": "STARTED but returning errors",
            "workers": "2/2 healthy",
            "issue": "Downstream dependency (Cognito) failing"
        },
        "cardsSCABusinessAPI": {
            "status": "DEGRADED",
            "health": "STARTED but failing transactions",
            "workers": "3/3 healthy",
            "issue": "Cannot obtain access tokens from OAuth API"
        },
        "businessDashboard": {
            "journeyFailures": {
                "debitCards": "High failure rate on authentication step",
                "creditCards": "High failure rate on authentication step"
            },
            "failureRate": "12%",
            "trend": "Increasing"
        }
    })
}

fn timeline() -> Value {
    json!([
        {
            "time": "18:30:00",
            "event": "First 504 errors detected from OAuth API",
            "source": "Application logs"
        },
        {
            "time": "18:32:00",
            "event": "Error rate spike detected in APPD",
            "metric": "Error rate increased from 2% to 8%"
        },
        {
            "time": "18:35:00",
            "event": "Customer complaints received",
            "impact": "eCommerce transactions failing"
        },
        {
            "time": "18:36:00",
            "event": "Failure rate exceeded 10% threshold",
            "action": "P3 ticket creation triggered"
        },
        {
            "time": "18:38:00",
            "event": "Cognito System API confirmed as root cause",
            "finding": "Consistent 5000ms+ response times"
        }
    ])
}

fn remediation_steps() -> Value {
    json!([
        {
            "step": 1,
            "action": "Verify Cognito System API health",
            "status": "COMPLETED",
            "finding": "Cognito API timing out - AWS issue suspected",
            "owner": "AWS Cognito team"
        },
        {
            "step": 2,
            "action": "Check Cards SCA Business dashboard",
            "status": "COMPLETED",
            "finding": "Failure rate 12% on authentication journeys",
            "tool": "Business Intelligence Dashboard"
        },
        {
            "step": 3,
            "action": "Perform 5 debit + 5 credit test transactions",
            "status": "COMPLETED",
            "result": "9/10 failed - consistent authentication errors"
        },
        {
            "step": 4,
            "action": "Fetch MI report for customer impact",
            "status": "IN_PROGRESS",
            "command": "Query MI system for failed transactions in timeframe"
        },
        {
            "step": 5,
            "action": "Create P3 ticket",
            "status": "REQUIRED",
            "reason": "Failure rate > 10% threshold",
            "justification": "Continuous errors impacting customer transactions"
        },
        {
            "step": 6,
            "action": "Escalate to AWS Cognito team",
            "status": "REQUIRED",
            "reason": "Root cause in external dependency",
            "priority": "HIGH"
        },
        {
            "step": 7,
            "action": "Implement circuit breaker (if prolonged)",
            "status": "PENDING",
            "reason": "Prevent cascade failures",
            "estimatedTime": "30 minutes"
        }
    ])
}

fn recommendations() -> Value {
    json!({
        "immediate": [
            "Escalate to AWS Cognito support team immediately",
            "Implement circuit breaker for OAuth API to prevent cascade failures",
            "Enable fallback authentication mechanism if available",
            "Increase timeout threshold temporarily (from 5s to 10s) to allow slow responses"
        ],
        "shortTerm": [
            "Add health check endpoint for Cognito System API",
            "Implement retry logic with exponential backoff",
            "Set up proactive alerts for Cognito API latency",
            "Create runbook for OAuth/Cognito failures"
        ],
        "longTerm": [
            "Implement authentication service redundancy",
            "Consider multi-region Cognito setup",
            "Add caching layer for frequently used tokens",
            "Implement graceful degradation for authentication failures"
        ]
    })
}

fn monitoring_alerts() -> Value {
    json!({
        "existing": [
            {
                "name": "OAuth API Error Rate",
                "threshold": "10%",
                "current": "12%",
                "status": "TRIGGERED"
            },
            {
                "name": "Response Time P95",
                "threshold": "2000ms",
                "current": "5000ms+",
                "status": "TRIGGERED"
            }
        ],
        "recommended": [
            {
                "name": "Cognito API Health Check",
                "threshold": "Response time > 3000ms",
                "severity": "HIGH"
            },
            {
                "name": "Cards SCA Transaction Failure Rate",
                "threshold": "> 5%",
                "severity": "MEDIUM"
            },
            {
                "name": "Access Token Generation Failures",
                "threshold": "> 3 failures in 5 minutes",
                "severity": "HIGH"
            }
        ]
    })
}
