//! Per-model-type validations: declaration and checks.

use crate::chain::CallbackChain;
use crate::context::ValidationContext;
use crate::error::{GroupError, Result};
use crate::executor::{CheckOptions, GroupExecutor};
use crate::group::{GroupName, GroupSelection};
use crate::model::Model;
use crate::recorder::GroupScope;
use crate::registry::GroupRegistry;
use crate::rule::{Rule, RuleOptions};
use crate::selector::{self, DefaultGroupSelector};
use std::fmt;

/// All validation rules of one model type.
///
/// Built once while the type's rules are declared, then shared (for
/// example behind a `static` or an `Arc`) by every check. Declaring needs
/// `&mut self` and checking needs `&self`, so the two phases cannot overlap.
///
/// ## Example
///
/// ```rust,ignore
/// use valgroup::prelude::*;
///
/// let mut validations = Validations::<Person>::new();
/// validations.validates(presence_of("sex"));
/// validations.group("first_name_group", |g| {
///     g.validates(presence_of("first_name"));
/// })?;
/// validations.group_with(
///     "name",
///     RuleOptions::new().if_(|p: &Person| p.last_name.is_none()),
///     |g| {
///         g.validates(presence_of("first_name"));
///         g.direct().validates(presence_of("last_name"));
///     },
/// )?;
///
/// let mut person = Person::default();
/// assert!(!validations.valid(&mut person)?);
/// assert!(!validations.group_valid(&mut person, "first_name_group")?);
/// ```
pub struct Validations<M> {
    global: CallbackChain<M>,
    registry: GroupRegistry<M>,
    selector: Option<DefaultGroupSelector<M>>,
    grouping_enabled: bool,
}

impl<M: Model + 'static> Validations<M> {
    /// Create a model type with no rules.
    pub fn new() -> Self {
        Self {
            global: CallbackChain::new(),
            registry: GroupRegistry::new(),
            selector: None,
            grouping_enabled: false,
        }
    }

    /// Declare a global (ungrouped) rule.
    pub fn validates(&mut self, rule: impl Rule<M> + 'static) -> &mut Self {
        self.global_scope(RuleOptions::new()).validates(rule);
        self
    }

    /// Declare a global rule with options.
    pub fn validates_with(
        &mut self,
        rule: impl Rule<M> + 'static,
        options: RuleOptions<M>,
    ) -> &mut Self {
        self.global_scope(RuleOptions::new()).validates_with(rule, options);
        self
    }

    /// Declare global rules sharing a set of default options.
    pub fn with_options<F>(&mut self, options: RuleOptions<M>, body: F) -> &mut Self
    where
        F: FnOnce(&mut GroupScope<'_, M>),
    {
        {
            let mut scope = self.global_scope(options);
            body(&mut scope);
        }
        self
    }

    /// Declare (or extend) a group.
    pub fn group<F>(&mut self, name: impl Into<GroupName>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut GroupScope<'_, M>),
    {
        self.group_with(name, RuleOptions::new(), body)
    }

    /// Declare (or extend) a group whose rules share default options.
    ///
    /// Rules declared through the scope get `options` merged in; rules
    /// declared through [`GroupScope::direct`] land in the group as they are.
    pub fn group_with<F>(
        &mut self,
        name: impl Into<GroupName>,
        options: RuleOptions<M>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut GroupScope<'_, M>),
    {
        self.declare_group(name, options, Some(body))?;
        Ok(self)
    }

    /// Declare a group from parts assembled at runtime.
    ///
    /// Fails with [`GroupError::ReservedGroupName`] for `global`/`all` and
    /// with [`GroupError::MissingBody`] when `body` is `None`; in both cases
    /// nothing is registered. Re-declaring an existing group appends to its
    /// chain. Returns whether the group is new.
    pub fn declare_group<F>(
        &mut self,
        name: impl Into<GroupName>,
        options: RuleOptions<M>,
        body: Option<F>,
    ) -> Result<bool>
    where
        F: FnOnce(&mut GroupScope<'_, M>),
    {
        let name = name.into();
        if name.is_reserved() {
            return Err(GroupError::ReservedGroupName(name));
        }
        let Some(body) = body else {
            return Err(GroupError::MissingBody(name));
        };

        self.enable_grouping();

        let (newly_declared, chain) = self.registry.open(name.clone());
        tracing::debug!(group = %name, newly_declared, "Declaring validation group");

        let mut scope = GroupScope::new(name, chain, options);
        body(&mut scope);

        Ok(newly_declared)
    }

    /// Set the function choosing groups when a check names none.
    pub fn default_group_selector<F, S>(&mut self, select: F) -> &mut Self
    where
        F: Fn(&M) -> S + Send + Sync + 'static,
        S: Into<GroupSelection>,
    {
        self.enable_grouping();
        self.selector = Some(DefaultGroupSelector::new(select));
        self
    }

    /// Set or fail: `None` is rejected with [`GroupError::MissingSelector`].
    pub fn set_default_group_selector<F, S>(&mut self, select: Option<F>) -> Result<&mut Self>
    where
        F: Fn(&M) -> S + Send + Sync + 'static,
        S: Into<GroupSelection>,
    {
        match select {
            Some(select) => Ok(self.default_group_selector(select)),
            None => Err(GroupError::MissingSelector),
        }
    }

    /// Switch the grouping machinery on. Returns whether this call did it.
    ///
    /// Happens on the first group declaration or selector configuration.
    /// Until then [`valid`](Self::valid) runs only the global rules.
    pub fn enable_grouping(&mut self) -> bool {
        if self.grouping_enabled {
            return false;
        }
        tracing::debug!("Enabling validation groups");
        self.grouping_enabled = true;
        true
    }

    /// Whether the grouping machinery is on.
    pub fn grouping_enabled(&self) -> bool {
        self.grouping_enabled
    }

    /// Whether `name` has been declared as a group.
    pub fn has_group(&self, name: &str) -> bool {
        self.registry.has_group(name)
    }

    /// Declared groups, in declaration order.
    pub fn groups(&self) -> &[GroupName] {
        self.registry.list_groups()
    }

    /// The group registry.
    pub fn registry(&self) -> &GroupRegistry<M> {
        &self.registry
    }

    /// The global (ungrouped) chain.
    pub fn global_chain(&self) -> &CallbackChain<M> {
        &self.global
    }

    /// The chain behind a declared group.
    pub fn group_chain(&self, name: &str) -> Option<&CallbackChain<M>> {
        self.registry.chain(name)
    }

    /// The default group selector, if one is set.
    pub fn selector(&self) -> Option<&DefaultGroupSelector<M>> {
        self.selector.as_ref()
    }

    /// Resolve which chains a check of `model` would run.
    pub fn select_groups(&self, model: &M, explicit: &[GroupName]) -> Vec<GroupName> {
        let selection = selector::select_groups(model, explicit, self.selector.as_ref());
        let groups = selector::expand(&selection, self.registry.list_groups());
        tracing::debug!(?selection, ?groups, "Resolved validation groups");
        groups
    }

    /// Full check under the inferred context.
    ///
    /// Clears the error list, then runs what the default selector picks
    /// (everything when there is none). Returns whether the record is valid.
    pub fn valid(&self, model: &mut M) -> Result<bool> {
        self.valid_with(model, CheckOptions::new())
    }

    /// Full check under an explicit context.
    pub fn valid_in(&self, model: &mut M, context: impl Into<ValidationContext>) -> Result<bool> {
        self.valid_with(model, CheckOptions::new().context(context))
    }

    /// Full check with options.
    pub fn valid_with(&self, model: &mut M, options: CheckOptions) -> Result<bool> {
        model.errors_mut().clear();

        let groups = if self.grouping_enabled {
            self.select_groups(model, &[])
        } else {
            vec![GroupName::global()]
        };

        self.executor().execute(model, &groups, &options)?;
        Ok(model.errors().is_empty())
    }

    /// Partial check of exactly the named groups.
    ///
    /// `global` runs only if named (or `all` is). With no names at all the
    /// default selector decides, as for a full check.
    pub fn groups_valid<I, N>(&self, model: &mut M, groups: I) -> Result<bool>
    where
        I: IntoIterator<Item = N>,
        N: Into<GroupName>,
    {
        self.groups_valid_with(model, groups, CheckOptions::new())
    }

    /// Partial check of one group.
    pub fn group_valid(&self, model: &mut M, group: impl Into<GroupName>) -> Result<bool> {
        let group: GroupName = group.into();
        self.groups_valid(model, [group])
    }

    /// Partial check with options.
    pub fn groups_valid_with<I, N>(
        &self,
        model: &mut M,
        groups: I,
        options: CheckOptions,
    ) -> Result<bool>
    where
        I: IntoIterator<Item = N>,
        N: Into<GroupName>,
    {
        model.errors_mut().clear();

        let explicit: Vec<GroupName> = groups.into_iter().map(Into::into).collect();
        let groups = self.select_groups(model, &explicit);

        self.executor().execute(model, &groups, &options)?;
        Ok(model.errors().is_empty())
    }

    fn executor(&self) -> GroupExecutor<'_, M> {
        GroupExecutor::new(&self.global, &self.registry)
    }

    fn global_scope(&mut self, defaults: RuleOptions<M>) -> GroupScope<'_, M> {
        GroupScope::new(GroupName::global(), &mut self.global, defaults)
    }
}

impl<M: Model + 'static> Default for Validations<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Validations<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validations")
            .field("global", &self.global.len())
            .field("groups", &self.registry)
            .field("has_selector", &self.selector.is_some())
            .field("grouping_enabled", &self.grouping_enabled)
            .finish()
    }
}
