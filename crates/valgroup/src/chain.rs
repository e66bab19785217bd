//! Ordered callback chains of rule invocations.

use crate::model::Model;
use crate::rule::RuleInvocation;
use std::fmt;

/// The ordered rules backing one group, or the global rules.
///
/// Chains only grow: declaring into an existing chain appends.
pub struct CallbackChain<M> {
    invocations: Vec<RuleInvocation<M>>,
}

impl<M> CallbackChain<M> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            invocations: Vec::new(),
        }
    }

    /// Append a rule invocation.
    pub fn push(&mut self, invocation: RuleInvocation<M>) {
        self.invocations.push(invocation);
    }

    /// Number of registered invocations.
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    /// Whether the chain has no invocations.
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Iterate over invocations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleInvocation<M>> {
        self.invocations.iter()
    }
}

impl<M: Model + 'static> CallbackChain<M> {
    /// Run every applicable rule against `model`, in order.
    ///
    /// Returns how many rules actually ran.
    pub fn run(&self, model: &mut M) -> usize {
        let mut ran = 0;
        for invocation in &self.invocations {
            if invocation.run(model) {
                ran += 1;
            }
        }
        ran
    }
}

impl<M> Default for CallbackChain<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for CallbackChain<M> {
    fn clone(&self) -> Self {
        Self {
            invocations: self.invocations.clone(),
        }
    }
}

impl<M> fmt::Debug for CallbackChain<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.invocations.iter()).finish()
    }
}
