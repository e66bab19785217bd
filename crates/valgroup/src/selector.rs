//! Choosing which groups a check runs.

use crate::group::{GroupName, GroupSelection};
use std::fmt;
use std::sync::Arc;

/// Picks the groups a check runs when the caller names none.
///
/// The selector sees the record, so the choice can depend on its state.
/// It may return anything convertible into a [`GroupSelection`]: a name,
/// a list of names, `"all"`, `"global"`, `None` or `()`.
pub struct DefaultGroupSelector<M> {
    select: Arc<dyn Fn(&M) -> GroupSelection + Send + Sync>,
}

impl<M> DefaultGroupSelector<M> {
    /// Wrap a selector function.
    pub fn new<F, S>(select: F) -> Self
    where
        F: Fn(&M) -> S + Send + Sync + 'static,
        S: Into<GroupSelection>,
    {
        Self {
            select: Arc::new(move |model: &M| select(model).into()),
        }
    }

    /// Ask the selector for `model`.
    pub fn select(&self, model: &M) -> GroupSelection {
        (self.select)(model)
    }
}

impl<M> Clone for DefaultGroupSelector<M> {
    fn clone(&self) -> Self {
        Self {
            select: Arc::clone(&self.select),
        }
    }
}

impl<M> fmt::Debug for DefaultGroupSelector<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultGroupSelector").finish_non_exhaustive()
    }
}

/// Decide what to run for `model`.
///
/// Explicit names win when there are any; otherwise the default selector
/// is asked; without one, everything runs.
pub fn select_groups<M>(
    model: &M,
    explicit: &[GroupName],
    selector: Option<&DefaultGroupSelector<M>>,
) -> GroupSelection {
    if !explicit.is_empty() {
        return GroupSelection::from_names(explicit);
    }
    match selector {
        Some(selector) => selector.select(model),
        None => GroupSelection::All,
    }
}

/// Expand a selection into the ordered list of chains to run.
///
/// `All` is `global` followed by `declared` in order. Duplicate names in an
/// explicit list collapse onto their first occurrence.
pub fn expand(selection: &GroupSelection, declared: &[GroupName]) -> Vec<GroupName> {
    match selection {
        GroupSelection::All => std::iter::once(GroupName::global())
            .chain(declared.iter().cloned())
            .collect(),
        GroupSelection::Global => vec![GroupName::global()],
        GroupSelection::Groups(names) => {
            let mut expanded: Vec<GroupName> = Vec::with_capacity(names.len());
            for name in names {
                if !expanded.contains(name) {
                    expanded.push(name.clone());
                }
            }
            expanded
        }
        GroupSelection::Nothing => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        male: bool,
    }

    fn names(list: &[&str]) -> Vec<GroupName> {
        list.iter().map(|n| GroupName::from(*n)).collect()
    }

    #[test]
    fn explicit_names_win() {
        let selector = DefaultGroupSelector::new(|_: &Record| "global");
        let selection = select_groups(&Record { male: false }, &names(&["a"]), Some(&selector));
        assert_eq!(selection, GroupSelection::Groups(names(&["a"])));
    }

    #[test]
    fn selector_used_without_explicit_names() {
        let selector = DefaultGroupSelector::new(|r: &Record| {
            if r.male {
                Some("first_name_group")
            } else {
                None
            }
        });

        assert_eq!(
            select_groups(&Record { male: true }, &[], Some(&selector)),
            GroupSelection::Groups(names(&["first_name_group"]))
        );
        assert_eq!(
            select_groups(&Record { male: false }, &[], Some(&selector)),
            GroupSelection::Nothing
        );
    }

    #[test]
    fn defaults_to_all() {
        assert_eq!(
            select_groups::<Record>(&Record { male: false }, &[], None),
            GroupSelection::All
        );
    }

    #[test]
    fn expand_all_puts_global_first() {
        let declared = names(&["first_name_group", "last_name_group"]);
        assert_eq!(
            expand(&GroupSelection::All, &declared),
            names(&["global", "first_name_group", "last_name_group"])
        );
    }

    #[test]
    fn expand_global_and_nothing() {
        let declared = names(&["a"]);
        assert_eq!(expand(&GroupSelection::Global, &declared), names(&["global"]));
        assert!(expand(&GroupSelection::Nothing, &declared).is_empty());
    }

    #[test]
    fn expand_keeps_explicit_order_without_duplicates() {
        let selection = GroupSelection::Groups(names(&["b", "a", "b"]));
        assert_eq!(expand(&selection, &[]), names(&["b", "a"]));
    }
}
