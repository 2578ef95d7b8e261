//! Drives a whole MCP session over the newline-delimited stdio framing.

use std::sync::Arc;

use anypoint_core::{AnypointCli, Mode};
use anypoint_mcp::{Dispatcher, McpServer};
use serde_json::{json, Value};

async fn run_session(mode: Mode, requests: &[Value]) -> Vec<Value> {
    let dispatcher = Dispatcher::new(mode, Arc::new(AnypointCli::new("anypoint-cli-missing-for-tests")));
    let server = McpServer::new(Arc::new(dispatcher));

    let mut input = String::new();
    for request in requests {
        input.push_str(&request.to_string());
        input.push('\n');
    }
    input.push('\n');

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let responses: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let expected = requests.iter().filter(|r| r.get("id").is_some()).count();
    assert_eq!(responses.len(), expected);
    responses
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_handshake_and_listing() {
    let responses = run_session(
        Mode::Mock,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "mulesoft-anypoint");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 18);
    let logs = tools
        .iter()
        .find(|t| t["name"] == "get_application_logs")
        .unwrap();
    assert_eq!(logs["inputSchema"]["type"], "object");
    assert_eq!(logs["inputSchema"]["required"], json!(["app_name"]));
    assert_eq!(logs["inputSchema"]["properties"]["tail_lines"]["default"], 100);
    assert_eq!(logs["inputSchema"]["properties"]["environment"]["default"], "Production");

    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn test_incident_walkthrough_in_mock_mode() {
    let responses = run_session(
        Mode::Mock,
        &[
            call(1, "get_active_alerts", json!({})),
            call(2, "diagnose_application_failure", json!({"app_name": "order-fulfillment-api"})),
            call(3, "diagnose_cards_sca_issue", json!({})),
            call(4, "get_api_analytics", json!({"api_id": "12346", "period": "24h"})),
            call(5, "diagnose_performance_issue", json!({"app_name": "customer-api"})),
        ],
    )
    .await;

    let alerts: Value = serde_json::from_str(tool_text(&responses[0])).unwrap();
    assert_eq!(alerts["summary"]["total"], 4);
    assert_eq!(alerts["alerts"].as_array().unwrap().len(), 4);

    let failure: Value = serde_json::from_str(tool_text(&responses[1])).unwrap();
    assert_eq!(failure["diagnosis"]["rootCause"], "MISSING_CONFIGURATION");
    let commands: Vec<&str> = failure["remediationSteps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["command"].as_str().unwrap())
        .collect();
    assert_eq!(
        commands,
        vec!["update_application_properties", "restart_application", "get_application_health"]
    );

    let incident: Value = serde_json::from_str(tool_text(&responses[2])).unwrap();
    assert_eq!(incident["incident"]["severity"], "P2");
    assert_eq!(incident["metrics"]["failedTransactions"]["total"], 83);
    assert_eq!(incident["remediationSteps"].as_array().unwrap().len(), 7);

    let analytics: Value = serde_json::from_str(tool_text(&responses[3])).unwrap();
    assert_eq!(analytics["period"], "24h");
    assert_eq!(analytics["metrics"]["requests"]["failureRate"], "6.8%");
    assert_eq!(analytics["alerts"].as_array().unwrap().len(), 2);

    let performance: Value = serde_json::from_str(tool_text(&responses[4])).unwrap();
    assert_eq!(performance["performanceAnalysis"]["overallRating"], "GOOD");
}

#[tokio::test]
async fn test_live_mode_without_cli_reports_error_result() {
    let responses = run_session(Mode::Live, &[call(1, "list_applications", json!({}))]).await;

    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[0]["result"]["isError"], true);
    assert!(tool_text(&responses[0]).starts_with("Error executing command: "));
}

#[tokio::test]
async fn test_malformed_line_does_not_end_session() {
    let dispatcher = Dispatcher::new(Mode::Mock, Arc::new(AnypointCli::default()));
    let server = McpServer::new(Arc::new(dispatcher));

    let input = b"this is not json\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";
    let mut output = Vec::new();
    server.serve(&input[..], &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], 9);
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_end_session() {
    let dispatcher = Dispatcher::new(Mode::Mock, Arc::new(AnypointCli::default()));
    let server = McpServer::new(Arc::new(dispatcher));

    let mut input = vec![0xff, 0xfe, b'\n'];
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n");
    let mut output = Vec::new();
    server.serve(&input[..], &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert!(lines[0]["id"].is_null());
    assert_eq!(lines[1]["id"], 9);
    assert_eq!(lines[1]["result"], json!({}));
}
