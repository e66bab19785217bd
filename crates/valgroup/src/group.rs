//! Group names and group selections.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a validation group.
///
/// Two names are reserved: [`GroupName::GLOBAL`] stands for the rules
/// declared outside any group, and [`GroupName::ALL`] selects every declared
/// group plus the global rules. Neither can be declared as a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Name of the ungrouped (baseline) rule chain.
    pub const GLOBAL: &'static str = "global";
    /// Selector sentinel meaning "global plus every declared group".
    pub const ALL: &'static str = "all";

    /// Create a group name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `global` sentinel.
    pub fn global() -> Self {
        Self::new(Self::GLOBAL)
    }

    /// The `all` sentinel.
    pub fn all() -> Self {
        Self::new(Self::ALL)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `global` sentinel.
    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }

    /// Whether this is the `all` sentinel.
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Whether this name collides with one of the reserved sentinels.
    pub fn is_reserved(&self) -> bool {
        self.is_global() || self.is_all()
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&GroupName> for GroupName {
    fn from(name: &GroupName) -> Self {
        name.clone()
    }
}

impl Borrow<str> for GroupName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for GroupName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for GroupName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a default group selector (or a caller) asks to run.
///
/// Converts from the shapes a selector naturally returns: a single name, a
/// list of names, `Option` of either, or `()` for "nothing". The strings
/// `"all"` and `"global"` map onto the sentinel variants.
///
/// On the wire a selection is `null`, a string or an array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionRepr", into = "SelectionRepr")]
pub enum GroupSelection {
    /// Global rules plus every declared group, in declaration order.
    #[default]
    All,
    /// Only the global (ungrouped) rules.
    Global,
    /// Exactly these names, in this order.
    Groups(Vec<GroupName>),
    /// Run nothing.
    Nothing,
}

impl GroupSelection {
    /// Build a selection from a list of names.
    ///
    /// An empty list selects nothing. A list containing `all` selects
    /// everything, whatever else it contains.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<GroupName>,
    {
        let names: Vec<GroupName> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            GroupSelection::Nothing
        } else if names.iter().any(GroupName::is_all) {
            GroupSelection::All
        } else {
            GroupSelection::Groups(names)
        }
    }

    /// Whether this selection runs no rules at all.
    pub fn is_nothing(&self) -> bool {
        matches!(self, GroupSelection::Nothing)
    }
}

impl From<GroupName> for GroupSelection {
    fn from(name: GroupName) -> Self {
        if name.is_all() {
            GroupSelection::All
        } else if name.is_global() {
            GroupSelection::Global
        } else {
            GroupSelection::Groups(vec![name])
        }
    }
}

impl From<&str> for GroupSelection {
    fn from(name: &str) -> Self {
        GroupName::from(name).into()
    }
}

impl From<String> for GroupSelection {
    fn from(name: String) -> Self {
        GroupName::from(name).into()
    }
}

impl<N: Into<GroupName>> From<Vec<N>> for GroupSelection {
    fn from(names: Vec<N>) -> Self {
        Self::from_names(names)
    }
}

impl<N: Into<GroupName>, const K: usize> From<[N; K]> for GroupSelection {
    fn from(names: [N; K]) -> Self {
        Self::from_names(names)
    }
}

impl<T: Into<GroupSelection>> From<Option<T>> for GroupSelection {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(GroupSelection::Nothing)
    }
}

impl From<()> for GroupSelection {
    fn from(_: ()) -> Self {
        GroupSelection::Nothing
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    Nothing(Option<()>),
    One(GroupName),
    Many(Vec<GroupName>),
}

impl From<SelectionRepr> for GroupSelection {
    fn from(repr: SelectionRepr) -> Self {
        match repr {
            SelectionRepr::Nothing(_) => GroupSelection::Nothing,
            SelectionRepr::One(name) => name.into(),
            SelectionRepr::Many(names) => GroupSelection::from_names(names),
        }
    }
}

impl From<GroupSelection> for SelectionRepr {
    fn from(selection: GroupSelection) -> Self {
        match selection {
            GroupSelection::All => SelectionRepr::One(GroupName::all()),
            GroupSelection::Global => SelectionRepr::One(GroupName::global()),
            GroupSelection::Groups(names) => SelectionRepr::Many(names),
            GroupSelection::Nothing => SelectionRepr::Nothing(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names() {
        assert!(GroupName::global().is_reserved());
        assert!(GroupName::all().is_reserved());
        assert!(!GroupName::from("name").is_reserved());
    }

    #[test]
    fn selection_from_single_name() {
        assert_eq!(GroupSelection::from("all"), GroupSelection::All);
        assert_eq!(GroupSelection::from("global"), GroupSelection::Global);
        assert_eq!(
            GroupSelection::from("first_name_group"),
            GroupSelection::Groups(vec![GroupName::from("first_name_group")])
        );
    }

    #[test]
    fn selection_from_lists() {
        assert_eq!(GroupSelection::from(Vec::<&str>::new()), GroupSelection::Nothing);
        assert_eq!(GroupSelection::from(["a", "all"]), GroupSelection::All);
        assert_eq!(
            GroupSelection::from(["global", "a"]),
            GroupSelection::Groups(vec![GroupName::global(), GroupName::from("a")])
        );
    }

    #[test]
    fn selection_from_absent_result() {
        assert_eq!(GroupSelection::from(None::<&str>), GroupSelection::Nothing);
        assert_eq!(GroupSelection::from(()), GroupSelection::Nothing);
        assert_eq!(
            GroupSelection::from(Some("a")),
            GroupSelection::Groups(vec![GroupName::from("a")])
        );
    }

    #[test]
    fn selection_deserialization() {
        let parsed: GroupSelection = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, GroupSelection::Nothing);

        let parsed: GroupSelection = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(parsed, GroupSelection::Global);

        let parsed: GroupSelection = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(
            parsed,
            GroupSelection::Groups(vec![GroupName::from("a"), GroupName::from("b")])
        );
    }

    #[test]
    fn selection_serialization() {
        let json = serde_json::to_string(&GroupSelection::All).unwrap();
        assert_eq!(json, "\"all\"");

        let json = serde_json::to_string(&GroupSelection::Nothing).unwrap();
        assert_eq!(json, "null");
    }
}
