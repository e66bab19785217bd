//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Once;
use valgroup::prelude::*;

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary (`RUST_LOG` controls output).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Default)]
pub struct Person {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<String>,
    pub persisted: bool,
    pub errors: ErrorList,
    pub context: Option<ValidationContext>,
}

impl Person {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "first_name" => self.first_name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "sex" => self.sex.as_deref(),
            _ => None,
        }
    }
}

impl Model for Person {
    fn errors(&self) -> &ErrorList {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ErrorList {
        &mut self.errors
    }

    fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn validation_context(&self) -> Option<&ValidationContext> {
        self.context.as_ref()
    }

    fn set_validation_context(&mut self, context: Option<ValidationContext>) {
        self.context = context;
    }
}

/// Fails when the attribute is missing or blank.
pub struct PresenceOf(&'static str);

pub fn presence_of(attribute: &'static str) -> PresenceOf {
    PresenceOf(attribute)
}

impl Rule<Person> for PresenceOf {
    fn validate(&self, person: &mut Person, args: &RuleArgs) {
        let blank = person
            .attribute(self.0)
            .map_or(true, |value| value.trim().is_empty());
        if blank {
            let message = args
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("can't be blank");
            person.errors.add_message(self.0, "presence", message);
        }
    }

    fn rule_name(&self) -> &str {
        "presence"
    }
}
