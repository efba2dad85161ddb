use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Per-field validation messages, keyed by the field's wire name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// All messages joined into the single line written to store state.
    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join("; ")
    }

    pub(crate) fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for FieldErrors {}

/// Required-ness and length limit of one text field.
pub(crate) struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub max_len: Option<usize>,
}

impl FieldRule {
    pub const fn required(field: &'static str, label: &'static str, max_len: usize) -> Self {
        Self {
            field,
            label,
            required: true,
            max_len: Some(max_len),
        }
    }

    pub const fn required_unbounded(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            required: true,
            max_len: None,
        }
    }
}

/// Checks `values` against `rules`, pairing them by field name.
///
/// Emptiness is judged after trimming; length counts characters, not bytes.
pub(crate) fn check(rules: &[FieldRule], values: &[(&'static str, &str)]) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for rule in rules {
        let value = values
            .iter()
            .find(|(field, _)| *field == rule.field)
            .map(|(_, value)| *value)
            .unwrap_or_default();

        if rule.required && value.trim().is_empty() {
            errors
                .0
                .insert(rule.field, format!("{} is required", rule.label));
            continue;
        }
        if let Some(max) = rule.max_len {
            if value.chars().count() > max {
                errors.0.insert(
                    rule.field,
                    format!("{} must be at most {} characters", rule.label, max),
                );
            }
        }
    }
    errors
}
