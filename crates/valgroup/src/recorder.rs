//! Recording rule declarations into a chain.
//!
//! A [`GroupScope`] is handed to the body of a group declaration. Every rule
//! declared through it lands in that group's chain with the group defaults
//! merged in. [`GroupScope::direct`] records into the same chain but leaves
//! the defaults out, for rules that should not inherit them.
//!
//! The open group travels as a value through the scope rather than as state
//! on the model type, so when the body returns (or unwinds) nothing needs to
//! be reset.

use crate::chain::CallbackChain;
use crate::group::GroupName;
use crate::model::Model;
use crate::rule::{Rule, RuleInvocation, RuleOptions};

/// Records rules into one chain, merging in scope defaults.
pub struct GroupScope<'a, M> {
    group: GroupName,
    chain: &'a mut CallbackChain<M>,
    defaults: RuleOptions<M>,
}

impl<'a, M: Model + 'static> GroupScope<'a, M> {
    pub(crate) fn new(
        group: GroupName,
        chain: &'a mut CallbackChain<M>,
        defaults: RuleOptions<M>,
    ) -> Self {
        Self {
            group,
            chain,
            defaults,
        }
    }

    /// The group being recorded into.
    pub fn group(&self) -> &GroupName {
        &self.group
    }

    /// Defaults merged into every rule declared through this scope.
    pub fn defaults(&self) -> &RuleOptions<M> {
        &self.defaults
    }

    /// Declare a rule with the scope defaults.
    pub fn validates(&mut self, rule: impl Rule<M> + 'static) -> &mut Self {
        self.validates_with(rule, RuleOptions::new())
    }

    /// Declare a rule with its own options, merged over the scope defaults.
    pub fn validates_with(
        &mut self,
        rule: impl Rule<M> + 'static,
        options: RuleOptions<M>,
    ) -> &mut Self {
        let options = options.merge_defaults(&self.defaults);
        let invocation = RuleInvocation::new(rule, options);
        tracing::trace!(
            group = %self.group,
            rule = invocation.rule_name(),
            "Recorded rule"
        );
        self.chain.push(invocation);
        self
    }

    /// Open a nested scope whose defaults are `options` over the current ones.
    pub fn with_options<F>(&mut self, options: RuleOptions<M>, body: F) -> &mut Self
    where
        F: FnOnce(&mut GroupScope<'_, M>),
    {
        let defaults = options.merge_defaults(&self.defaults);
        let mut nested = GroupScope::new(self.group.clone(), &mut *self.chain, defaults);
        body(&mut nested);
        self
    }

    /// Record into the same chain without the scope defaults.
    pub fn direct(&mut self) -> DirectScope<'_, M> {
        DirectScope {
            group: &self.group,
            chain: &mut *self.chain,
        }
    }
}

/// Records rules into a chain exactly as declared.
pub struct DirectScope<'a, M> {
    group: &'a GroupName,
    chain: &'a mut CallbackChain<M>,
}

impl<M: Model + 'static> DirectScope<'_, M> {
    /// Declare a rule without options.
    pub fn validates(&mut self, rule: impl Rule<M> + 'static) -> &mut Self {
        self.validates_with(rule, RuleOptions::new())
    }

    /// Declare a rule with exactly these options.
    pub fn validates_with(
        &mut self,
        rule: impl Rule<M> + 'static,
        options: RuleOptions<M>,
    ) -> &mut Self {
        let invocation = RuleInvocation::new(rule, options);
        tracing::trace!(
            group = %self.group,
            rule = invocation.rule_name(),
            "Recorded rule without group defaults"
        );
        self.chain.push(invocation);
        self
    }
}
