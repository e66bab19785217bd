//! Validation contexts and scoped context switching.

use crate::model::Model;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// The phase a check runs under.
///
/// Rules declared with `on(ValidationContext::Create)` only run while the
/// model's current context is `Create`, and so on.
///
/// ## Example
///
/// ```rust,ignore
/// use valgroup::prelude::*;
///
/// let options = RuleOptions::new().on(ValidationContext::Update);
/// assert_eq!(ValidationContext::from("update"), ValidationContext::Update);
/// ```
///
/// In configuration a context is a plain string: `"create"`, `"update"`, or
/// any other name for a custom context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidationContext {
    /// The record has not been persisted yet
    Create,
    /// The record already exists
    Update,
    /// Application-defined phase
    Custom(String),
}

impl ValidationContext {
    /// Create a custom context.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Infer the context from the persistence state of a record.
    pub fn infer(persisted: bool) -> Self {
        if persisted {
            ValidationContext::Update
        } else {
            ValidationContext::Create
        }
    }

    /// Get the context name as a string.
    pub fn name(&self) -> &str {
        match self {
            ValidationContext::Create => "create",
            ValidationContext::Update => "update",
            ValidationContext::Custom(name) => name,
        }
    }
}

impl From<&str> for ValidationContext {
    /// `create` and `update` are matched case-insensitively; custom names
    /// are kept as given.
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("create") {
            ValidationContext::Create
        } else if s.eq_ignore_ascii_case("update") {
            ValidationContext::Update
        } else {
            ValidationContext::Custom(s.to_string())
        }
    }
}

impl From<String> for ValidationContext {
    fn from(s: String) -> Self {
        ValidationContext::from(s.as_str())
    }
}

impl From<ValidationContext> for String {
    fn from(context: ValidationContext) -> Self {
        match context {
            ValidationContext::Custom(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl std::fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sets a model's validation context for the lifetime of the guard.
///
/// The previous context is put back when the guard drops, including during
/// unwinding, so nested scopes behave like a stack.
pub struct ContextScope<'a, M: Model> {
    model: &'a mut M,
    prior: Option<ValidationContext>,
}

impl<'a, M: Model> ContextScope<'a, M> {
    /// Enter `context` on `model`.
    pub fn enter(model: &'a mut M, context: ValidationContext) -> Self {
        let prior = model.validation_context().cloned();
        model.set_validation_context(Some(context));
        Self { model, prior }
    }
}

impl<M: Model> Deref for ContextScope<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: Model> DerefMut for ContextScope<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: Model> Drop for ContextScope<'_, M> {
    fn drop(&mut self) {
        self.model.set_validation_context(self.prior.take());
    }
}
