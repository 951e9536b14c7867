//! Field cleaning and validation helpers.

use thiserror::Error;

/// Client input failed validation.
///
/// Messages are meant to be shown to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join(" "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

/// Accumulates rule violations for a single entity.
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn require_non_empty(&mut self, value: &str, message: &str) {
        if value.is_empty() {
            self.push(message);
        }
    }

    pub fn require_positive_int(&mut self, value: &str, message: &str) {
        if !is_positive_int(value) {
            self.push(message);
        }
    }

    pub fn require_positive_int_csv(&mut self, value: &str, message: &str) {
        if !is_positive_int_csv(value) {
            self.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }
}

/// Remove every whitespace character, including interior ones.
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `true` for a base-10 integer greater than zero.
pub fn is_positive_int(value: &str) -> bool {
    value.parse::<i64>().map(|n| n > 0).unwrap_or(false)
}

/// `true` for a non-empty comma separated list of positive integers.
pub fn is_positive_int_csv(value: &str) -> bool {
    !value.is_empty() && value.split(',').all(is_positive_int)
}

/// Split a CSV of IDs, ignoring an empty input.
pub fn split_csv(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}
