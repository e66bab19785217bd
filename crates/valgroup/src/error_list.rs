//! The per-record error list that rules write into.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One error recorded against an attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeError {
    /// The rule code (e.g., "presence", "format")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl AttributeError {
    /// Create a new attribute error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Errors of one record, keyed by attribute name.
///
/// Errors for an attribute keep the order in which rules added them. The
/// list is cleared at the start of every check, so it only ever reflects the
/// most recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorList {
    #[serde(flatten)]
    attributes: HashMap<String, Vec<AttributeError>>,
}

impl ErrorList {
    /// Create an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for an attribute.
    pub fn add(&mut self, attribute: impl Into<String>, error: AttributeError) {
        self.attributes
            .entry(attribute.into())
            .or_default()
            .push(error);
    }

    /// Add a plain message for an attribute under the given code.
    pub fn add_message(
        &mut self,
        attribute: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add(attribute, AttributeError::new(code, message));
    }

    /// Remove every error.
    pub fn clear(&mut self) {
        self.attributes.clear();
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.attributes.values().all(Vec::is_empty)
    }

    /// Total number of errors across all attributes.
    pub fn len(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }

    /// Errors recorded for one attribute; empty if there are none.
    pub fn get(&self, attribute: &str) -> &[AttributeError] {
        self.attributes
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Messages recorded for one attribute.
    pub fn messages(&self, attribute: &str) -> Vec<String> {
        self.get(attribute)
            .iter()
            .map(|error| error.message.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut errors = ErrorList::new();
        errors.add_message("first_name", "presence", "can't be blank");
        errors.add_message("first_name", "length", "is too short");
        errors.add_message("sex", "presence", "can't be blank");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("first_name").len(), 2);
        assert_eq!(errors.get("first_name")[1].code, "length");
        assert!(errors.get("last_name").is_empty());
        assert_eq!(errors.messages("sex"), vec!["can't be blank".to_string()]);
        assert_eq!(errors.get("sex")[0].to_string(), "[presence] can't be blank");
    }

    #[test]
    fn clear_empties_the_list() {
        let mut errors = ErrorList::new();
        errors.add_message("sex", "presence", "can't be blank");
        assert!(!errors.is_empty());

        errors.clear();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
        assert!(errors.get("sex").is_empty());
    }

    #[test]
    fn serializes_keyed_by_attribute() {
        let mut errors = ErrorList::new();
        errors.add_message("sex", "presence", "can't be blank");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["sex"][0]["code"], "presence");
        assert_eq!(json["sex"][0]["message"], "can't be blank");
    }
}
