//! Tool Handler
//!
//! Routes a tool call to its canned payload (mock mode) or to `anypoint-cli`
//! (live mode). Every outcome, including bad arguments and process failures,
//! becomes a [`ToolResult`].

use std::collections::HashMap;
use std::sync::Arc;

use anypoint_core::{iso_timestamp, system_clock, Clock, CommandRunner, Mode};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::mock::MockContext;
use crate::params::ToolArgs;
use crate::protocol::{Tool, ToolResult};
use crate::tools::{all_tools, ToolDef};

pub struct Dispatcher {
    mode: Mode,
    runner: Arc<dyn CommandRunner>,
    clock: Clock,
    tools: Vec<ToolDef>,
    index: HashMap<&'static str, usize>,
}

impl Dispatcher {
    pub fn new(mode: Mode, runner: Arc<dyn CommandRunner>) -> Self {
        let tools = all_tools();
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name, i))
            .collect();

        Self {
            mode,
            runner,
            clock: system_clock(),
            tools,
            index,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDef> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Definitions for `tools/list`, in catalogue order
    pub fn definitions(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDef::definition).collect()
    }

    /// Handle a tool call
    pub async fn call(&self, name: &str, arguments: &Map<String, Value>) -> ToolResult {
        let Some(tool) = self.tool(name) else {
            warn!("Unknown tool: {}", name);
            return ToolResult::error(format!("Unknown tool: {}", name));
        };

        let args = match ToolArgs::resolve(tool.params, arguments) {
            Ok(args) => args,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        info!(tool = name, mode = self.mode.label(), "Calling tool");

        match self.mode {
            Mode::Mock => self.mock(tool, &args),
            Mode::Live => self.live(tool, &args).await,
        }
    }

    fn mock(&self, tool: &ToolDef, args: &ToolArgs) -> ToolResult {
        let ctx = MockContext {
            args,
            timestamp: iso_timestamp((self.clock)()),
        };

        match serde_json::to_string_pretty(&tool.mock.render(&ctx)) {
            Ok(text) => ToolResult::success(text),
            Err(e) => ToolResult::error(format!("Serialization error: {}", e)),
        }
    }

    async fn live(&self, tool: &ToolDef, args: &ToolArgs) -> ToolResult {
        let argv = match (tool.live)(args) {
            Ok(argv) => argv,
            Err(e) => return ToolResult::error(format!("Error executing command: {}", e)),
        };

        debug!("anypoint-cli {:?}", argv);

        // The CLI's text is the result body either way; failures also carry isError.
        match self.runner.run(&argv).await {
            Ok(output) if output.success => ToolResult::success(output.stdout),
            Ok(output) => ToolResult::error(format!("Error: {}", output.stderr)),
            Err(e) => ToolResult::error(format!("Error executing command: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anypoint_core::{fixed_clock, CommandOutput, RunnerError};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records argv and replays a canned outcome
    struct FakeCli {
        calls: Mutex<Vec<Vec<String>>>,
        outcome: fn() -> Result<CommandOutput, RunnerError>,
    }

    impl FakeCli {
        fn new(outcome: fn() -> Result<CommandOutput, RunnerError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                outcome,
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeCli {
        async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError> {
            self.calls.lock().unwrap().push(args.to_vec());
            (self.outcome)()
        }
    }

    fn ok_output() -> Result<CommandOutput, RunnerError> {
        Ok(CommandOutput::success("[{\"name\":\"customer-api\"}]\n"))
    }

    fn mock_dispatcher() -> (Dispatcher, Arc<FakeCli>) {
        let cli = FakeCli::new(ok_output);
        let at = Utc.with_ymd_and_hms(2026, 2, 14, 10, 20, 0).unwrap();
        let dispatcher = Dispatcher::new(Mode::Mock, cli.clone()).with_clock(fixed_clock(at));
        (dispatcher, cli)
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn parse(result: &ToolResult) -> Value {
        assert!(!result.is_error, "{}", result.text());
        serde_json::from_str(&result.text()).unwrap()
    }

    #[tokio::test]
    async fn test_mock_never_runs_cli() {
        let (dispatcher, cli) = mock_dispatcher();
        let result = dispatcher.call("list_applications", &Map::new()).await;
        let doc = parse(&result);

        assert_eq!(doc["total"], 6);
        assert_eq!(doc["applications"].as_array().unwrap().len(), 6);
        assert_eq!(doc["applications"][2]["status"], "FAILED");
        assert_eq!(doc["applications"][0]["environment"], "Production");
        assert!(cli.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mock_output_is_pretty_json() {
        let (dispatcher, _) = mock_dispatcher();
        let result = dispatcher
            .call("execute_custom_anypoint_command", &args(json!({"command": "api-mgr api list"})))
            .await;
        assert_eq!(
            result.text(),
            "{\n  \"message\": \"Mock mode enabled - command not executed\",\n  \
             \"command\": \"api-mgr api list\",\n  \
             \"note\": \"Set MULESOFT_MOCK_MODE=false to execute real commands\"\n}"
        );
    }

    #[tokio::test]
    async fn test_describe_variants() {
        let (dispatcher, _) = mock_dispatcher();

        let failed = parse(
            &dispatcher
                .call("describe_application", &args(json!({"app_name": "order-fulfillment-api"})))
                .await,
        );
        assert_eq!(failed["application"]["status"], "FAILED");
        assert_eq!(
            failed["application"]["errorDetails"],
            "Configuration property 'db.host' is missing"
        );
        let keys: Vec<_> = failed["application"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.last().map(String::as_str), Some("lastDeployment"));

        let started = parse(
            &dispatcher
                .call("describe_application", &args(json!({"app_name": "customer-api", "environment": "Staging"})))
                .await,
        );
        assert_eq!(started["application"]["status"], "STARTED");
        assert_eq!(started["application"]["environment"], "Staging");
        assert_eq!(started["application"]["domain"], "customer-api.us-e1.cloudhub.io");
        assert!(started["application"].get("errorMessage").is_none());
    }

    #[tokio::test]
    async fn test_logs_fallback_and_timestamp() {
        let (dispatcher, _) = mock_dispatcher();
        let doc = parse(
            &dispatcher
                .call("get_application_logs", &args(json!({"app_name": "billing-api"})))
                .await,
        );
        assert_eq!(doc["logLines"].as_array().unwrap().len(), 3);
        assert_eq!(doc["timestamp"], "2026-02-14T10:20:00.000000Z");

        let doc = parse(
            &dispatcher
                .call("get_application_logs", &args(json!({"app_name": "oauth-authentication-experience-api"})))
                .await,
        );
        assert_eq!(doc["logLines"].as_array().unwrap().len(), 22);
    }

    #[tokio::test]
    async fn test_health_variants() {
        let (dispatcher, _) = mock_dispatcher();
        for (app, expected) in [
            ("payment-processor", "DEGRADED"),
            ("order-fulfillment-api", "CRITICAL"),
            ("customer-api", "HEALTHY"),
            ("", "HEALTHY"),
        ] {
            let doc = parse(
                &dispatcher
                    .call("get_application_health", &args(json!({"app_name": app})))
                    .await,
            );
            assert_eq!(doc["overallHealth"], expected, "{}", app);
        }
    }

    #[tokio::test]
    async fn test_keyed_payloads_cover_every_case() {
        let (dispatcher, _) = mock_dispatcher();
        let cases = [
            ("describe_application", json!({"app_name": "order-fulfillment-api"}), "/application/status", json!("FAILED")),
            ("describe_application", json!({"app_name": "customer-api"}), "/application/status", json!("STARTED")),
            ("get_application_logs", json!({"app_name": "oauth-authentication-experience-api"}), "/logLines/0",
             json!("2024-09-06T18:35:07.628Z INFO [[MuleRuntime].uber.15: [oauth-authentication-experience-api].oauth-authentication-exp-11ef-8a7b-0ab70e1f9a09] org.mule.runtime.core.internal.processor.LoggerMessageProcessor: {")),
            ("get_application_logs", json!({"app_name": "cards-sca-business-api"}), "/logLines/2",
             json!("2024-09-06T18:34:05.678Z ERROR OAuth API returned 504 - Gateway Timeout")),
            ("get_application_logs", json!({"app_name": "order-fulfillment-api"}), "/logLines/3",
             json!("2026-02-14 08:00:15 FATAL [main] Application startup failed")),
            ("get_application_logs", json!({"app_name": "payment-processor"}), "/logLines/3",
             json!("2026-02-14 10:16:05 ERROR [http-listener-2] Payment gateway timeout after 5000ms")),
            ("get_application_logs", json!({"app_name": "inventory-sync-service"}), "/logLines/2",
             json!("2026-02-14 10:21:15 INFO  [scheduler-1] Scheduled task executed")),
            ("get_api_analytics", json!({"api_id": "12346"}), "/metrics/requests/failureRate", json!("6.8%")),
            ("get_api_analytics", json!({"api_id": "12345"}), "/metrics/requests/failureRate", json!("0.5%")),
            ("get_application_health", json!({"app_name": "payment-processor"}), "/overallHealth", json!("DEGRADED")),
            ("get_application_health", json!({"app_name": "order-fulfillment-api"}), "/overallHealth", json!("CRITICAL")),
            ("get_application_health", json!({"app_name": "customer-api"}), "/overallHealth", json!("HEALTHY")),
            ("get_worker_diagnostics", json!({"app_name": "payment-processor", "worker_id": "worker-1"}), "/workerId", json!("worker-1")),
            ("get_worker_diagnostics", json!({"app_name": "payment-processor"}), "/workerId", json!("worker-0")),
            ("diagnose_application_failure", json!({"app_name": "order-fulfillment-api"}), "/diagnosis/rootCause", json!("MISSING_CONFIGURATION")),
            ("diagnose_application_failure", json!({"app_name": "customer-api"}), "/message",
             json!("No critical failures detected for this application")),
            ("diagnose_performance_issue", json!({"app_name": "payment-processor"}), "/performanceAnalysis/overallRating", json!("POOR")),
            ("diagnose_performance_issue", json!({"app_name": "customer-api"}), "/performanceAnalysis/overallRating", json!("GOOD")),
        ];

        for (tool, supplied, pointer, expected) in cases {
            let doc = parse(&dispatcher.call(tool, &args(supplied.clone())).await);
            assert_eq!(doc.pointer(pointer), Some(&expected), "{} {}", tool, supplied);
        }
    }

    #[tokio::test]
    async fn test_log_variants_line_counts() {
        let (dispatcher, _) = mock_dispatcher();
        for (app, lines) in [
            ("oauth-authentication-experience-api", 22),
            ("cards-sca-business-api", 10),
            ("order-fulfillment-api", 5),
            ("payment-processor", 7),
            ("customer-api", 3),
        ] {
            let doc = parse(
                &dispatcher
                    .call("get_application_logs", &args(json!({"app_name": app})))
                    .await,
            );
            assert_eq!(doc["logLines"].as_array().unwrap().len(), lines, "{}", app);
            assert_eq!(doc["applicationName"], app);
        }
    }

    #[tokio::test]
    async fn test_update_properties() {
        let (dispatcher, _) = mock_dispatcher();

        let doc = parse(
            &dispatcher
                .call(
                    "update_application_properties",
                    &args(json!({"app_name": "order-fulfillment-api", "properties": "{\"db.host\": \"h\"}"})),
                )
                .await,
        );
        assert_eq!(doc["status"], "UPDATING");
        assert_eq!(doc["updatedProperties"], json!({"db.host": "h"}));

        let result = dispatcher
            .call(
                "update_application_properties",
                &args(json!({"app_name": "order-fulfillment-api", "properties": "db.host=h"})),
            )
            .await;
        assert!(!result.is_error);
        assert_eq!(parse(&result), json!({"error": "Invalid JSON format for properties"}));
    }

    #[tokio::test]
    async fn test_scale_echoes_workers() {
        let (dispatcher, _) = mock_dispatcher();
        let doc = parse(
            &dispatcher
                .call("scale_application", &args(json!({"app_name": "payment-processor", "workers": "4"})))
                .await,
        );
        assert_eq!(doc["currentWorkers"], 2);
        assert_eq!(doc["targetWorkers"], 4);
        assert_eq!(doc["message"], "Scaling application to 4 workers");
    }

    #[tokio::test]
    async fn test_argument_errors() {
        let (dispatcher, _) = mock_dispatcher();

        let missing = dispatcher.call("restart_application", &Map::new()).await;
        assert!(missing.is_error);
        assert_eq!(missing.text(), "Missing required argument: app_name");

        let bad = dispatcher
            .call("scale_application", &args(json!({"app_name": "x", "workers": "many"})))
            .await;
        assert!(bad.is_error);
        assert_eq!(bad.text(), "Invalid argument 'workers': expected integer");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (dispatcher, cli) = mock_dispatcher();
        let result = dispatcher.call("delete_everything", &Map::new()).await;
        assert!(result.is_error);
        assert_eq!(result.text(), "Unknown tool: delete_everything");
        assert!(cli.calls().is_empty());
    }

    #[tokio::test]
    async fn test_live_relays_stdout() {
        let cli = FakeCli::new(ok_output);
        let dispatcher = Dispatcher::new(Mode::Live, cli.clone());

        let result = dispatcher
            .call("list_applications", &args(json!({"environment": "Sandbox"})))
            .await;
        assert!(!result.is_error);
        assert_eq!(result.text(), "[{\"name\":\"customer-api\"}]\n");
        assert_eq!(
            cli.calls(),
            vec![vec!["runtime-mgr", "cloudhub-application", "list", "--environment", "Sandbox"]]
        );
    }

    #[tokio::test]
    async fn test_live_failure_relays_stderr() {
        let cli = FakeCli::new(|| Ok(CommandOutput::failure("Not authenticated\n")));
        let dispatcher = Dispatcher::new(Mode::Live, cli);

        let result = dispatcher
            .call("restart_application", &args(json!({"app_name": "customer-api"})))
            .await;
        assert!(result.is_error);
        assert_eq!(result.text(), "Error: Not authenticated\n");
    }

    #[tokio::test]
    async fn test_live_spawn_failure() {
        let cli = FakeCli::new(|| {
            Err(RunnerError::Spawn {
                program: "anypoint-cli".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        let dispatcher = Dispatcher::new(Mode::Live, cli);

        let result = dispatcher.call("list_apis", &Map::new()).await;
        assert!(result.is_error);
        assert!(result.text().starts_with("Error executing command: failed to run 'anypoint-cli'"));
    }

    #[tokio::test]
    async fn test_live_unsplittable_command() {
        let cli = FakeCli::new(ok_output);
        let dispatcher = Dispatcher::new(Mode::Live, cli.clone());

        let result = dispatcher
            .call("execute_custom_anypoint_command", &args(json!({"command": "exchange asset list \"x"})))
            .await;
        assert!(result.is_error);
        assert!(result.text().starts_with("Error executing command: "));
        assert!(cli.calls().is_empty());
    }

    #[tokio::test]
    async fn test_every_tool_answers_in_mock_mode() {
        let (dispatcher, _) = mock_dispatcher();
        let supplied = args(json!({
            "app_name": "customer-api",
            "api_id": "12345",
            "artifact_path": "target/customer-api-1.0.0-mule-application.jar",
            "properties": "{}",
            "workers": 2,
            "command": "runtime-mgr cloudhub-application list"
        }));

        for tool in dispatcher.tools() {
            let result = dispatcher.call(tool.name, &supplied).await;
            let doc = parse(&result);
            assert!(doc.is_object(), "{}", tool.name);
        }
    }
}
