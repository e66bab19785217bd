//! Rules, their options, and registered rule invocations.

use crate::context::ValidationContext;
use crate::model::Model;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Rule-specific arguments (e.g. a custom `message`).
pub type RuleArgs = serde_json::Map<String, serde_json::Value>;

/// A predicate over the record, used for `if` / `unless` options.
pub type Condition<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;

/// A validation rule.
///
/// Rules inspect a record and append to its own error list, so later rules
/// and conditions in the same check see what earlier ones recorded. They are
/// not provided by this crate; any closure with the right shape is a rule.
///
/// ## Example
///
/// ```rust,ignore
/// use valgroup::prelude::*;
///
/// let sex_present = |person: &mut Person, args: &RuleArgs| {
///     if person.sex.is_none() {
///         let message = args.get("message").and_then(|m| m.as_str()).unwrap_or("can't be blank");
///         person.errors_mut().add_message("sex", "presence", message);
///     }
/// };
/// ```
pub trait Rule<M>: Send + Sync {
    /// Check `model`, recording failures in `model.errors_mut()`.
    fn validate(&self, model: &mut M, args: &RuleArgs);

    /// Get the rule name for logging.
    fn rule_name(&self) -> &str {
        "custom"
    }
}

impl<M, F> Rule<M> for F
where
    F: Fn(&mut M, &RuleArgs) + Send + Sync,
{
    fn validate(&self, model: &mut M, args: &RuleArgs) {
        self(model, args)
    }
}

/// Options attached to a rule when it is declared.
///
/// When a rule is declared inside a group, the group's defaults are merged
/// in with [`RuleOptions::merge_defaults`]: conditions from both sides must
/// hold, and anything the rule sets itself wins over the group default.
pub struct RuleOptions<M> {
    if_: Vec<Condition<M>>,
    unless: Vec<Condition<M>>,
    on: Option<ValidationContext>,
    args: RuleArgs,
}

impl<M> RuleOptions<M> {
    /// Create empty options.
    pub fn new() -> Self {
        Self {
            if_: Vec::new(),
            unless: Vec::new(),
            on: None,
            args: RuleArgs::new(),
        }
    }

    /// Only run the rule when `condition` holds.
    pub fn if_(mut self, condition: impl Fn(&M) -> bool + Send + Sync + 'static) -> Self {
        self.if_.push(Arc::new(condition));
        self
    }

    /// Skip the rule when `condition` holds.
    pub fn unless(mut self, condition: impl Fn(&M) -> bool + Send + Sync + 'static) -> Self {
        self.unless.push(Arc::new(condition));
        self
    }

    /// Only run the rule under the given validation context.
    pub fn on(mut self, context: impl Into<ValidationContext>) -> Self {
        self.on = Some(context.into());
        self
    }

    /// Set a rule-specific argument.
    ///
    /// A value that cannot be represented as JSON is left out and logged.
    pub fn arg(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.args.insert(key, v);
            }
            Err(error) => {
                tracing::warn!(
                    arg = %key,
                    error = %error,
                    "Dropping rule argument that cannot be serialized"
                );
            }
        }
        self
    }

    /// Shorthand for the `message` argument.
    pub fn message(self, message: impl Into<String>) -> Self {
        self.arg("message", message.into())
    }

    /// The `if` conditions.
    pub fn conditions(&self) -> &[Condition<M>] {
        &self.if_
    }

    /// The `unless` conditions.
    pub fn unless_conditions(&self) -> &[Condition<M>] {
        &self.unless
    }

    /// The context this rule is restricted to.
    pub fn context(&self) -> Option<&ValidationContext> {
        self.on.as_ref()
    }

    /// The rule-specific arguments.
    pub fn args(&self) -> &RuleArgs {
        &self.args
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.if_.is_empty() && self.unless.is_empty() && self.on.is_none() && self.args.is_empty()
    }

    /// Merge `defaults` underneath these options.
    ///
    /// `if` and `unless` lists are concatenated (defaults first), so both
    /// sides are AND-ed. `on` and argument keys set here are kept; defaults
    /// only fill the gaps.
    pub fn merge_defaults(mut self, defaults: &RuleOptions<M>) -> Self {
        let mut if_ = defaults.if_.clone();
        if_.append(&mut self.if_);
        self.if_ = if_;

        let mut unless = defaults.unless.clone();
        unless.append(&mut self.unless);
        self.unless = unless;

        if self.on.is_none() {
            self.on = defaults.on.clone();
        }

        for (key, value) in &defaults.args {
            if !self.args.contains_key(key) {
                self.args.insert(key.clone(), value.clone());
            }
        }

        self
    }
}

impl<M> Default for RuleOptions<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for RuleOptions<M> {
    fn clone(&self) -> Self {
        Self {
            if_: self.if_.clone(),
            unless: self.unless.clone(),
            on: self.on.clone(),
            args: self.args.clone(),
        }
    }
}

impl<M> fmt::Debug for RuleOptions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleOptions")
            .field("if", &self.if_.len())
            .field("unless", &self.unless.len())
            .field("on", &self.on)
            .field("args", &self.args)
            .finish()
    }
}

/// A rule registered in a callback chain, with its final options.
///
/// Options are fixed at registration. An `on` context becomes one more
/// `if` condition comparing against the record's current context.
pub struct RuleInvocation<M> {
    rule: Arc<dyn Rule<M>>,
    options: RuleOptions<M>,
    if_: Vec<Condition<M>>,
}

impl<M: Model + 'static> RuleInvocation<M> {
    /// Register `rule` with `options`.
    pub fn new(rule: impl Rule<M> + 'static, options: RuleOptions<M>) -> Self {
        let mut if_ = options.if_.clone();
        if let Some(phase) = options.on.clone() {
            if_.push(Arc::new(move |model: &M| {
                model.validation_context() == Some(&phase)
            }));
        }

        Self {
            rule: Arc::new(rule),
            options,
            if_,
        }
    }

    /// Whether the rule should run against `model` right now.
    pub fn applies(&self, model: &M) -> bool {
        self.if_.iter().all(|condition| condition(model))
            && !self.options.unless.iter().any(|condition| condition(model))
    }

    /// Run the rule if it applies. Returns whether it ran.
    pub fn run(&self, model: &mut M) -> bool {
        if !self.applies(model) {
            tracing::trace!(rule = self.rule.rule_name(), "Skipping rule, condition not met");
            return false;
        }
        self.rule.validate(model, &self.options.args);
        true
    }
}

impl<M> RuleInvocation<M> {
    /// The options this rule was registered with.
    pub fn options(&self) -> &RuleOptions<M> {
        &self.options
    }

    /// Name of the underlying rule.
    pub fn rule_name(&self) -> &str {
        self.rule.rule_name()
    }
}

impl<M> Clone for RuleInvocation<M> {
    fn clone(&self) -> Self {
        Self {
            rule: Arc::clone(&self.rule),
            options: self.options.clone(),
            if_: self.if_.clone(),
        }
    }
}

impl<M> fmt::Debug for RuleInvocation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleInvocation")
            .field("rule", &self.rule.rule_name())
            .field("options", &self.options)
            .finish()
    }
}
