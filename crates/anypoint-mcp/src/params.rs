//! Tool parameters
//!
//! Every tool declares its parameters as a static [`ParamSpec`] list. The
//! same list produces the JSON schema advertised by `tools/list` and resolves
//! the loosely typed `arguments` object of a `tools/call` into [`ToolArgs`].

use serde_json::{json, Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
}

impl ParamKind {
    fn json_type(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
        }
    }
}

/// Whether a parameter must be supplied, or what it falls back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Default(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub requirement: Requirement,
}

impl ParamSpec {
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            description,
            requirement: Requirement::Required,
        }
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Integer,
            description,
            requirement: Requirement::Required,
        }
    }

    pub const fn or(mut self, default: &'static str) -> Self {
        self.requirement = Requirement::Default(default);
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }

    /// JSON schema fragment for this parameter
    pub fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.json_type(),
            "description": self.description,
        });
        if let Requirement::Default(default) = self.requirement {
            schema["default"] = match parse_literal(self.kind, default) {
                Some(ArgValue::Int(n)) => json!(n),
                _ => json!(default),
            };
        }
        schema
    }

    fn resolve(&self, supplied: Option<&Value>) -> Result<ArgValue, ArgError> {
        match supplied.filter(|v| !v.is_null()) {
            Some(value) => coerce(self, value),
            None => match self.requirement {
                Requirement::Required => Err(ArgError::Missing(self.name)),
                Requirement::Default(default) => parse_literal(self.kind, default)
                    .ok_or(ArgError::NotInteger(self.name)),
            },
        }
    }
}

/// A resolved argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
}

impl ArgValue {
    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::Str(s) => json!(s),
            ArgValue::Int(n) => json!(n),
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Int(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("Missing required argument: {0}")]
    Missing(&'static str),

    #[error("Invalid argument '{0}': expected integer")]
    NotInteger(&'static str),
}

/// Arguments of one call after defaults and coercion
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: HashMap<&'static str, ArgValue>,
}

impl ToolArgs {
    /// Resolve `arguments` against `specs`. Unknown keys are ignored.
    pub fn resolve(specs: &[ParamSpec], arguments: &Map<String, Value>) -> Result<Self, ArgError> {
        let mut values = HashMap::with_capacity(specs.len());
        for spec in specs {
            values.insert(spec.name, spec.resolve(arguments.get(spec.name))?);
        }

        for key in arguments.keys() {
            if !specs.iter().any(|s| s.name == key) {
                debug!("Ignoring unknown argument: {}", key);
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Textual form of a value, as passed on a command line
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(ToString::to_string).unwrap_or_default()
    }

    /// JSON form of a value, `null` when the tool does not declare it
    pub fn json(&self, name: &str) -> Value {
        self.get(name).map(ArgValue::to_json).unwrap_or(Value::Null)
    }
}

fn parse_literal(kind: ParamKind, raw: &str) -> Option<ArgValue> {
    match kind {
        ParamKind::String => Some(ArgValue::Str(raw.to_string())),
        ParamKind::Integer => raw.trim().parse().ok().map(ArgValue::Int),
    }
}

fn coerce(spec: &ParamSpec, value: &Value) -> Result<ArgValue, ArgError> {
    match spec.kind {
        ParamKind::String => Ok(ArgValue::Str(match value {
            Value::String(s) => s.clone(),
            // objects and arrays keep their JSON text, e.g. `properties`
            other => other.to_string(),
        })),
        ParamKind::Integer => match value {
            Value::Number(n) => n.as_i64().map(ArgValue::Int),
            Value::String(s) => parse_literal(ParamKind::Integer, s),
            _ => None,
        }
        .ok_or(ArgError::NotInteger(spec.name)),
    }
}
