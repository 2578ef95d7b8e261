//! Anypoint Tool Definitions
//!
//! The fixed catalogue exposed over MCP. Each entry pairs its parameters with
//! a demo payload and the `anypoint-cli` invocation used in live mode.

use serde_json::{Map, Value};

use crate::live::{self, LiveFn};
use crate::mock::{alerts, apis, applications, diagnostics, incidents, MockPayload, Variants};
use crate::params::ParamSpec;
use crate::protocol::{InputSchema, Tool};

/// One catalogue entry
#[derive(Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub mock: MockPayload,
    pub live: LiveFn,
}

impl ToolDef {
    /// MCP definition advertised by `tools/list`
    pub fn definition(&self) -> Tool {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();

        Tool {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties,
                required: self
                    .params
                    .iter()
                    .filter(|p| p.is_required())
                    .map(|p| p.name.to_string())
                    .collect(),
            },
        }
    }
}

const ENVIRONMENT: ParamSpec = ParamSpec::string("environment", "Environment name").or("Production");
const APP_NAME: ParamSpec = ParamSpec::string("app_name", "Name of the application");
const API_ID: ParamSpec = ParamSpec::string("api_id", "API identifier");

const LIST_APPLICATIONS: &[ParamSpec] = &[ParamSpec::string(
    "environment",
    "Environment name (e.g., Production, Staging, Development)",
)
.or("Production")];
const APP_IN_ENV: &[ParamSpec] = &[APP_NAME, ENVIRONMENT];
const ENV_ONLY: &[ParamSpec] = &[ENVIRONMENT];
const API_IN_ENV: &[ParamSpec] = &[API_ID, ENVIRONMENT];
const APPLICATION_LOGS: &[ParamSpec] = &[
    APP_NAME,
    ENVIRONMENT,
    ParamSpec::integer("tail_lines", "Number of recent log lines to retrieve (default 100)").or("100"),
];
const API_ANALYTICS: &[ParamSpec] = &[
    API_ID,
    ParamSpec::string("period", "Time period (1h, 6h, 24h, 7d, 30d)").or("1h"),
    ENVIRONMENT,
];
const WORKER_DIAGNOSTICS: &[ParamSpec] = &[
    APP_NAME,
    ParamSpec::string("worker_id", "Worker identifier (e.g., worker-0, worker-1)").or("worker-0"),
    ENVIRONMENT,
];
const RESTART: &[ParamSpec] = &[
    ParamSpec::string("app_name", "Name of the application to restart"),
    ENVIRONMENT,
];
const DEPLOY: &[ParamSpec] = &[
    APP_NAME,
    ParamSpec::string("artifact_path", "Path to the application JAR file"),
    ENVIRONMENT,
    ParamSpec::integer("workers", "Number of workers (default 1)").or("1"),
    ParamSpec::string("worker_type", "Worker size (MICRO, SMALL, MEDIUM, LARGE)").or("MICRO"),
];
const UPDATE_PROPERTIES: &[ParamSpec] = &[
    APP_NAME,
    ParamSpec::string("properties", "JSON string of property key-value pairs"),
    ENVIRONMENT,
];
const SCALE: &[ParamSpec] = &[
    APP_NAME,
    ParamSpec::integer("workers", "New number of workers"),
    ENVIRONMENT,
];
const FAILED_APP: &[ParamSpec] = &[
    ParamSpec::string("app_name", "Name of the failed application"),
    ENVIRONMENT,
];
const CUSTOM_COMMAND: &[ParamSpec] = &[ParamSpec::string(
    "command",
    "The Anypoint CLI command to execute (without 'anypoint-cli' prefix). \
     Example: \"runtime-mgr cloudhub-application list --environment Production\"",
)];

/// Get all available Anypoint tools, in advertised order
pub fn all_tools() -> Vec<ToolDef> {
    vec![
        // =========================================================================
        // Application management
        // =========================================================================
        ToolDef {
            name: "list_applications",
            description: "List all deployed Mule applications in an environment",
            params: LIST_APPLICATIONS,
            mock: MockPayload::Fixed(applications::list),
            live: live::list_applications,
        },
        ToolDef {
            name: "describe_application",
            description: "Get detailed information about a specific Mule application",
            params: APP_IN_ENV,
            mock: MockPayload::Keyed(
                Variants::keyed_on("app_name")
                    .case("order-fulfillment-api", applications::describe_failed)
                    .fallback(applications::describe_started),
            ),
            live: live::describe_application,
        },
        ToolDef {
            name: "get_application_logs",
            description: "Get recent application logs for troubleshooting",
            params: APPLICATION_LOGS,
            mock: MockPayload::Keyed(
                Variants::keyed_on("app_name")
                    .case("oauth-authentication-experience-api", applications::logs_oauth)
                    .case("cards-sca-business-api", applications::logs_cards_sca)
                    .case("order-fulfillment-api", applications::logs_order_fulfillment)
                    .case("payment-processor", applications::logs_payment)
                    .fallback(applications::logs_generic),
            ),
            live: live::get_application_logs,
        },
        // =========================================================================
        // API management
        // =========================================================================
        ToolDef {
            name: "list_apis",
            description: "List all managed APIs in API Manager",
            params: ENV_ONLY,
            mock: MockPayload::Fixed(apis::list),
            live: live::list_apis,
        },
        ToolDef {
            name: "get_api_analytics",
            description: "Get API analytics and metrics for performance monitoring",
            params: API_ANALYTICS,
            mock: MockPayload::Keyed(
                Variants::keyed_on("api_id")
                    .case("12346", apis::analytics_degraded)
                    .fallback(apis::analytics_healthy),
            ),
            live: live::get_api_analytics,
        },
        ToolDef {
            name: "list_api_policies",
            description: "List all policies applied to an API",
            params: API_IN_ENV,
            mock: MockPayload::Fixed(apis::policies),
            live: live::list_api_policies,
        },
        // =========================================================================
        // Runtime diagnostics
        // =========================================================================
        ToolDef {
            name: "get_application_health",
            description: "Get comprehensive health check for an application",
            params: APP_IN_ENV,
            mock: MockPayload::Keyed(
                Variants::keyed_on("app_name")
                    .case("payment-processor", diagnostics::health_degraded)
                    .case("order-fulfillment-api", diagnostics::health_critical)
                    .fallback(diagnostics::health_ok),
            ),
            live: live::describe_application,
        },
        ToolDef {
            name: "get_worker_diagnostics",
            description: "Get detailed diagnostics for a specific worker instance",
            params: WORKER_DIAGNOSTICS,
            mock: MockPayload::Fixed(diagnostics::worker),
            live: live::describe_application,
        },
        // =========================================================================
        // Operational actions
        // =========================================================================
        ToolDef {
            name: "restart_application",
            description: "Restart a Mule application",
            params: RESTART,
            mock: MockPayload::Fixed(applications::restart),
            live: live::restart_application,
        },
        ToolDef {
            name: "deploy_application",
            description: "Deploy or redeploy a Mule application",
            params: DEPLOY,
            mock: MockPayload::Fixed(applications::deploy),
            live: live::deploy_application,
        },
        ToolDef {
            name: "update_application_properties",
            description: "Update application properties (configuration)",
            params: UPDATE_PROPERTIES,
            mock: MockPayload::Fixed(applications::update_properties),
            live: live::update_application_properties,
        },
        ToolDef {
            name: "scale_application",
            description: "Scale application by changing number of workers",
            params: SCALE,
            mock: MockPayload::Fixed(applications::scale),
            live: live::scale_application,
        },
        ToolDef {
            name: "clear_application_queues",
            description: "Clear persistent queues for an application",
            params: APP_IN_ENV,
            mock: MockPayload::Fixed(applications::clear_queues),
            live: live::clear_application_queues,
        },
        // =========================================================================
        // Alerts
        // =========================================================================
        ToolDef {
            name: "get_active_alerts",
            description: "Get all active alerts and notifications for the environment",
            params: ENV_ONLY,
            mock: MockPayload::Fixed(alerts::active),
            live: live::get_active_alerts,
        },
        // =========================================================================
        // Troubleshooting scenarios
        // =========================================================================
        ToolDef {
            name: "diagnose_cards_sca_issue",
            description: "Comprehensive diagnostic for Cards SCA access token issues. \
                          Based on real-world incident playbook",
            params: ENV_ONLY,
            mock: MockPayload::Fixed(incidents::cards_sca),
            live: live::diagnose_cards_sca_issue,
        },
        ToolDef {
            name: "diagnose_application_failure",
            description: "Comprehensive diagnostic for a failed application. \
                          Returns root cause analysis and remediation steps",
            params: FAILED_APP,
            mock: MockPayload::Keyed(
                Variants::keyed_on("app_name")
                    .case("order-fulfillment-api", diagnostics::failure_missing_config)
                    .fallback(diagnostics::failure_none),
            ),
            live: live::describe_application,
        },
        ToolDef {
            name: "diagnose_performance_issue",
            description: "Analyze performance issues and provide optimization recommendations",
            params: APP_IN_ENV,
            mock: MockPayload::Keyed(
                Variants::keyed_on("app_name")
                    .case("payment-processor", diagnostics::performance_poor)
                    .fallback(diagnostics::performance_good),
            ),
            live: live::diagnose_performance_issue,
        },
        // =========================================================================
        // Utility
        // =========================================================================
        ToolDef {
            name: "execute_custom_anypoint_command",
            description: "Execute a custom Anypoint CLI command for advanced operations",
            params: CUSTOM_COMMAND,
            mock: MockPayload::Fixed(applications::custom_command),
            live: live::custom_command,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_unique_and_ordered() {
        let tools = all_tools();
        assert_eq!(tools.len(), 18);
        assert_eq!(tools[0].name, "list_applications");
        assert_eq!(tools[17].name, "execute_custom_anypoint_command");

        let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn test_environment_defaults_everywhere() {
        for tool in all_tools() {
            if let Some(env) = tool.params.iter().find(|p| p.name == "environment") {
                assert_eq!(
                    env.requirement,
                    crate::params::Requirement::Default("Production"),
                    "{}",
                    tool.name
                );
            }
        }
    }

    #[test]
    fn test_deploy_definition() {
        let tool = all_tools()
            .into_iter()
            .find(|t| t.name == "deploy_application")
            .unwrap()
            .definition();

        assert_eq!(tool.input_schema.required, vec!["app_name", "artifact_path"]);
        let keys: Vec<_> = tool.input_schema.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["app_name", "artifact_path", "environment", "workers", "worker_type"]);
        assert_eq!(tool.input_schema.properties["workers"]["default"], 1);
        assert_eq!(tool.input_schema.properties["worker_type"]["default"], "MICRO");
    }

    #[test]
    fn test_keyed_payloads_use_declared_param() {
        for tool in all_tools() {
            if let MockPayload::Keyed(variants) = &tool.mock {
                assert!(
                    tool.params.iter().any(|p| p.name == variants.key() && p.is_required()),
                    "{} keys on undeclared {}",
                    tool.name,
                    variants.key()
                );
            }
        }
    }
}
