//! Running resolved groups against a record.

use crate::chain::CallbackChain;
use crate::context::{ContextScope, ValidationContext};
use crate::error::{GroupError, Result};
use crate::group::GroupName;
use crate::model::Model;
use crate::registry::GroupRegistry;

/// Options for a single check.
///
/// ## Example
///
/// ```rust,ignore
/// use valgroup::prelude::*;
///
/// let options = CheckOptions::new().context(ValidationContext::Update);
/// validations.groups_valid_with(&mut person, ["name"], options)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    context: Option<ValidationContext>,
    skip_global: bool,
}

impl CheckOptions {
    /// Create default options: inferred context, global rules included.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run under this context instead of inferring one from the record.
    pub fn context(mut self, context: impl Into<ValidationContext>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Leave out the global chain even if the selection names it.
    pub fn skip_global(mut self, skip: bool) -> Self {
        self.skip_global = skip;
        self
    }

    /// The explicit context, if any.
    pub fn explicit_context(&self) -> Option<&ValidationContext> {
        self.context.as_ref()
    }

    /// Whether the global chain is skipped.
    pub fn skips_global(&self) -> bool {
        self.skip_global
    }
}

/// Runs the chains of a model type against a record.
pub struct GroupExecutor<'a, M> {
    global: &'a CallbackChain<M>,
    registry: &'a GroupRegistry<M>,
}

impl<'a, M: Model + 'static> GroupExecutor<'a, M> {
    /// Create an executor over a global chain and a group registry.
    pub fn new(global: &'a CallbackChain<M>, registry: &'a GroupRegistry<M>) -> Self {
        Self { global, registry }
    }

    /// Run `groups` in order, appending to the record's error list.
    ///
    /// Every name is checked before anything runs, so an undeclared group
    /// fails the call without touching the error list. Each chain runs
    /// inside its own validation context scope.
    pub fn execute(
        &self,
        model: &mut M,
        groups: &[GroupName],
        options: &CheckOptions,
    ) -> Result<()> {
        let mut chains = Vec::with_capacity(groups.len());
        for name in groups {
            if name.is_global() {
                if !options.skips_global() {
                    chains.push((name, self.global));
                }
                continue;
            }
            match self.registry.chain(name.as_str()) {
                Some(chain) => chains.push((name, chain)),
                None => {
                    tracing::warn!(
                        group = %name,
                        "Check references an undeclared validation group"
                    );
                    return Err(GroupError::UndeclaredGroup(name.clone()));
                }
            }
        }

        let context = options
            .explicit_context()
            .cloned()
            .unwrap_or_else(|| model.default_validation_context());

        for (name, chain) in chains {
            tracing::debug!(
                group = %name,
                context = %context,
                rules = chain.len(),
                "Running validation group"
            );
            let mut scope = ContextScope::enter(&mut *model, context.clone());
            chain.run(&mut scope);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_list::ErrorList;
    use crate::recorder::GroupScope;
    use crate::rule::{RuleArgs, RuleOptions};

    #[derive(Default)]
    struct Record {
        persisted: bool,
        errors: ErrorList,
        context: Option<ValidationContext>,
    }

    impl Model for Record {
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

    fn report(
        attribute: &'static str,
    ) -> impl Fn(&mut Record, &RuleArgs) + Send + Sync {
        move |record: &mut Record, _: &RuleArgs| {
            let context = record
                .validation_context()
                .map(ValidationContext::to_string)
                .unwrap_or_default();
            record.errors.add_message(attribute, "ran", context);
        }
    }

    fn fixture() -> (CallbackChain<Record>, GroupRegistry<Record>) {
        let mut global = CallbackChain::new();
        GroupScope::new(GroupName::global(), &mut global, RuleOptions::new())
            .validates(report("global"));

        let mut registry = GroupRegistry::new();
        let (_, chain) = registry.open(GroupName::from("name"));
        GroupScope::new(GroupName::from("name"), chain, RuleOptions::new())
            .validates(report("name"));

        (global, registry)
    }

    #[test]
    fn runs_groups_in_order_under_inferred_context() {
        let (global, registry) = fixture();
        let executor = GroupExecutor::new(&global, &registry);
        let mut record = Record::default();

        executor
            .execute(
                &mut record,
                &[GroupName::global(), GroupName::from("name")],
                &CheckOptions::new(),
            )
            .unwrap();

        assert_eq!(record.errors.messages("global"), vec!["create".to_string()]);
        assert_eq!(record.errors.messages("name"), vec!["create".to_string()]);
        assert!(record.validation_context().is_none());
    }

    #[test]
    fn explicit_context_overrides_inference() {
        let (global, registry) = fixture();
        let executor = GroupExecutor::new(&global, &registry);
        let mut record = Record {
            persisted: true,
            ..Default::default()
        };

        executor
            .execute(&mut record, &[GroupName::from("name")], &CheckOptions::new())
            .unwrap();
        assert_eq!(record.errors.messages("name"), vec!["update".to_string()]);

        record.errors.clear();
        executor
            .execute(
                &mut record,
                &[GroupName::from("name")],
                &CheckOptions::new().context("publish"),
            )
            .unwrap();
        assert_eq!(record.errors.messages("name"), vec!["publish".to_string()]);
    }

    #[test]
    fn skip_global_leaves_global_chain_out() {
        let (global, registry) = fixture();
        let executor = GroupExecutor::new(&global, &registry);
        let mut record = Record::default();

        executor
            .execute(
                &mut record,
                &[GroupName::global(), GroupName::from("name")],
                &CheckOptions::new().skip_global(true),
            )
            .unwrap();

        assert!(record.errors.get("global").is_empty());
        assert_eq!(record.errors.len(), 1);
    }

    #[test]
    fn undeclared_group_aborts_before_running() {
        let (global, registry) = fixture();
        let executor = GroupExecutor::new(&global, &registry);
        let mut record = Record::default();

        let result = executor.execute(
            &mut record,
            &[GroupName::global(), GroupName::from("dummy")],
            &CheckOptions::new(),
        );

        assert_eq!(result, Err(GroupError::UndeclaredGroup(GroupName::from("dummy"))));
        assert!(record.errors.is_empty());
    }

    #[test]
    fn prior_context_restored() {
        let (global, registry) = fixture();
        let executor = GroupExecutor::new(&global, &registry);
        let mut record = Record {
            context: Some(ValidationContext::custom("import")),
            ..Default::default()
        };

        executor
            .execute(&mut record, &[GroupName::from("name")], &CheckOptions::new())
            .unwrap();

        assert_eq!(record.errors.messages("name"), vec!["create".to_string()]);
        assert_eq!(record.context, Some(ValidationContext::custom("import")));
    }
}
