//! `anypoint-cli` argument vectors for live mode
//!
//! One builder per tool. The program name itself is supplied by the runner.

use thiserror::Error;

use crate::params::ToolArgs;

#[derive(Error, Debug)]
pub enum LiveError {
    #[error("failed to parse command: {0}")]
    Split(#[from] shell_words::ParseError),
}

pub type LiveFn = fn(&ToolArgs) -> Result<Vec<String>, LiveError>;

fn words(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// `runtime-mgr cloudhub-application <verb> <app> --environment <env>`
fn cloudhub(verb: &str, app: &str, args: &ToolArgs) -> Vec<String> {
    let env = args.text("environment");
    words(&["runtime-mgr", "cloudhub-application", verb, app, "--environment", &env])
}

pub fn list_applications(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let env = args.text("environment");
    Ok(words(&["runtime-mgr", "cloudhub-application", "list", "--environment", &env]))
}

/// Used by describe, health, worker diagnostics and failure diagnosis alike
pub fn describe_application(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    Ok(cloudhub("describe", &args.text("app_name"), args))
}

pub fn get_application_logs(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let mut argv = cloudhub("tail-logs", &args.text("app_name"), args);
    argv.extend(words(&["--lines", &args.text("tail_lines")]));
    Ok(argv)
}

pub fn list_apis(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let env = args.text("environment");
    Ok(words(&["api-mgr", "api", "list", "--environment", &env]))
}

pub fn get_api_analytics(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let (api, period, env) = (args.text("api_id"), args.text("period"), args.text("environment"));
    Ok(words(&[
        "api-mgr", "analytics", "query",
        "--api-id", &api,
        "--period", &period,
        "--environment", &env,
    ]))
}

pub fn list_api_policies(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let (api, env) = (args.text("api_id"), args.text("environment"));
    Ok(words(&["api-mgr", "policy", "list", "--api-id", &api, "--environment", &env]))
}

pub fn restart_application(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    Ok(cloudhub("restart", &args.text("app_name"), args))
}

pub fn deploy_application(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let (app, artifact) = (args.text("app_name"), args.text("artifact_path"));
    let (env, workers, size) = (
        args.text("environment"),
        args.text("workers"),
        args.text("worker_type"),
    );
    Ok(words(&[
        "runtime-mgr", "cloudhub-application", "deploy", &app, &artifact,
        "--environment", &env,
        "--workers", &workers,
        "--workerSize", &size,
    ]))
}

pub fn update_application_properties(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let mut argv = cloudhub("modify", &args.text("app_name"), args);
    argv.extend(words(&["--property", &args.text("properties")]));
    Ok(argv)
}

pub fn scale_application(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let (app, workers, env) = (args.text("app_name"), args.text("workers"), args.text("environment"));
    Ok(words(&[
        "runtime-mgr", "cloudhub-application", "modify", &app,
        "--workers", &workers,
        "--environment", &env,
    ]))
}

pub fn clear_application_queues(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    Ok(cloudhub("clear-queues", &args.text("app_name"), args))
}

pub fn get_active_alerts(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let env = args.text("environment");
    Ok(words(&["monitoring", "alert", "list", "--environment", &env]))
}

pub fn diagnose_cards_sca_issue(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    Ok(cloudhub("describe", "cards-sca-business-api", args))
}

pub fn diagnose_performance_issue(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    let (app, env) = (args.text("app_name"), args.text("environment"));
    Ok(words(&["monitoring", "metrics", "query", "--application", &app, "--environment", &env]))
}

/// Split like a POSIX shell would, without running one
pub fn custom_command(args: &ToolArgs) -> Result<Vec<String>, LiveError> {
    Ok(shell_words::split(&args.text("command"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSpec;
    use serde_json::json;

    fn resolve(specs: &[ParamSpec], value: serde_json::Value) -> ToolArgs {
        ToolArgs::resolve(specs, value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_logs_argv() {
        let args = resolve(
            &[
                ParamSpec::string("app_name", ""),
                ParamSpec::string("environment", "").or("Production"),
                ParamSpec::integer("tail_lines", "").or("100"),
            ],
            json!({"app_name": "payment-processor", "tail_lines": 25}),
        );
        assert_eq!(
            get_application_logs(&args).unwrap(),
            vec![
                "runtime-mgr", "cloudhub-application", "tail-logs", "payment-processor",
                "--environment", "Production", "--lines", "25",
            ]
        );
    }

    #[test]
    fn test_cards_sca_targets_fixed_app() {
        let args = resolve(
            &[ParamSpec::string("environment", "").or("Production")],
            json!({"environment": "Staging"}),
        );
        assert_eq!(
            diagnose_cards_sca_issue(&args).unwrap(),
            vec![
                "runtime-mgr", "cloudhub-application", "describe", "cards-sca-business-api",
                "--environment", "Staging",
            ]
        );
    }

    #[test]
    fn test_custom_command_split() {
        let specs = [ParamSpec::string("command", "")];
        let args = resolve(
            &specs,
            json!({"command": "exchange asset list --search 'order api'"}),
        );
        assert_eq!(
            custom_command(&args).unwrap(),
            vec!["exchange", "asset", "list", "--search", "order api"]
        );

        let args = resolve(&specs, json!({"command": "account environment list 'Prod"}));
        let err = custom_command(&args).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse command"));
    }
}
