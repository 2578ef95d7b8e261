//! Canned platform responses for demo mode
//!
//! Each tool owns a [`MockPayload`]: either one fixed document, or a
//! [`Variants`] table that picks a document by the value of one argument
//! (the application name or API id) and always has a fallback.

use serde_json::Value;

use crate::params::ToolArgs;

pub mod alerts;
pub mod apis;
pub mod applications;
pub mod diagnostics;
pub mod incidents;

/// What a payload builder gets to see
pub struct MockContext<'a> {
    pub args: &'a ToolArgs,
    /// Call time, already formatted
    pub timestamp: String,
}

impl MockContext<'_> {
    /// Resolved argument as JSON, for echoing into a document
    pub fn arg(&self, name: &str) -> Value {
        self.args.json(name)
    }
}

pub type MockFn = fn(&MockContext<'_>) -> Value;

/// Payload selection keyed on one argument
#[derive(Clone)]
pub struct Variants {
    key: &'static str,
    cases: Vec<(&'static str, MockFn)>,
    fallback: MockFn,
}

/// A [`Variants`] table still waiting for its fallback
pub struct VariantsBuilder {
    key: &'static str,
    cases: Vec<(&'static str, MockFn)>,
}

impl Variants {
    pub fn keyed_on(key: &'static str) -> VariantsBuilder {
        VariantsBuilder {
            key,
            cases: Vec::new(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Named cases, in declaration order
    pub fn cases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cases.iter().map(|(name, _)| *name)
    }

    /// Builder for `value`; the fallback covers every unnamed value
    pub fn select(&self, value: &str) -> MockFn {
        self.cases
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, build)| *build)
            .unwrap_or(self.fallback)
    }
}

impl VariantsBuilder {
    pub fn case(mut self, value: &'static str, build: MockFn) -> Self {
        self.cases.push((value, build));
        self
    }

    pub fn fallback(self, build: MockFn) -> Variants {
        Variants {
            key: self.key,
            cases: self.cases,
            fallback: build,
        }
    }
}

#[derive(Clone)]
pub enum MockPayload {
    Fixed(MockFn),
    Keyed(Variants),
}

impl MockPayload {
    pub fn render(&self, ctx: &MockContext<'_>) -> Value {
        match self {
            MockPayload::Fixed(build) => build(ctx),
            MockPayload::Keyed(variants) => {
                let value = ctx.args.text(variants.key());
                variants.select(&value)(ctx)
            }
        }
    }
}
