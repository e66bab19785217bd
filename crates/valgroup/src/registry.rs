//! Group registry of a model type.

use crate::chain::CallbackChain;
use crate::group::GroupName;
use std::collections::HashMap;
use std::fmt;

/// Declared group names of a model type and the chain behind each.
///
/// Append-only: names are kept in declaration order and never removed.
pub struct GroupRegistry<M> {
    order: Vec<GroupName>,
    chains: HashMap<GroupName, CallbackChain<M>>,
}

impl<M> GroupRegistry<M> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            chains: HashMap::new(),
        }
    }

    /// Register `name` if absent. Returns whether it was newly added.
    pub fn declare_group(&mut self, name: impl Into<GroupName>) -> bool {
        self.open(name.into()).0
    }

    /// Whether `name` has been declared.
    pub fn has_group(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Declared names, in declaration order.
    pub fn list_groups(&self) -> &[GroupName] {
        &self.order
    }

    /// The chain of a declared group.
    pub fn chain(&self, name: &str) -> Option<&CallbackChain<M>> {
        self.chains.get(name)
    }

    /// Number of declared groups.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no group has been declared.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Declare `name` if needed and hand out its chain for recording.
    pub(crate) fn open(&mut self, name: GroupName) -> (bool, &mut CallbackChain<M>) {
        let newly_declared = !self.chains.contains_key(&name);
        if newly_declared {
            self.order.push(name.clone());
        }
        (newly_declared, self.chains.entry(name).or_default())
    }
}

impl<M> Default for GroupRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for GroupRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.order
                    .iter()
                    .map(|name| (name, self.chains.get(name).map_or(0, CallbackChain::len))),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record;

    #[test]
    fn declare_is_idempotent() {
        let mut registry = GroupRegistry::<Record>::new();

        assert!(registry.declare_group("name"));
        assert!(!registry.declare_group("name"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn groups_listed_in_declaration_order() {
        let mut registry = GroupRegistry::<Record>::new();
        registry.declare_group("b");
        registry.declare_group("a");
        registry.declare_group("b");
        registry.declare_group("c");

        let names: Vec<&str> = registry.list_groups().iter().map(GroupName::as_str).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn has_group() {
        let mut registry = GroupRegistry::<Record>::new();
        assert!(!registry.has_group("name"));

        registry.declare_group("name");
        assert!(registry.has_group("name"));
        assert!(registry.chain("name").is_some_and(CallbackChain::is_empty));
    }
}
