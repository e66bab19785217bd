use crate::group::GroupName;
use thiserror::Error;

/// Errors raised while declaring or running validation groups.
///
/// A rule that finds invalid data is not an error here; it writes into the
/// record's [`ErrorList`](crate::ErrorList) and the check returns `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("Validation group '{0}' not defined")]
    UndeclaredGroup(GroupName),

    #[error("Validation group '{0}' was declared without a body")]
    MissingBody(GroupName),

    #[error("Default validation group selector was set without a body")]
    MissingSelector,

    #[error("Validation group name '{0}' is reserved")]
    ReservedGroupName(GroupName),
}

pub type Result<T> = std::result::Result<T, GroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let error = GroupError::UndeclaredGroup(GroupName::from("dummy"));
        assert_eq!(error.to_string(), "Validation group 'dummy' not defined");

        let error = GroupError::ReservedGroupName(GroupName::all());
        assert_eq!(error.to_string(), "Validation group name 'all' is reserved");
    }
}
