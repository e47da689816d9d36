// catalog_core/src/validation/validator.rs

use super::rules::{Presence, RuleSet};
use crate::model::ProductFields;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One failed rule, reported to the client as `{ "field": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

/// Runs a `RuleSet` over submitted fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
  /// Returns failures in rule order. An empty list means the input is acceptable.
  #[instrument(name = "FieldValidator::validate", skip(self, input), fields(rule_set = rules.name))]
  pub fn validate(&self, input: &ProductFields, rules: &RuleSet) -> Vec<FieldError> {
    let failures: Vec<FieldError> = rules
      .rules
      .iter()
      .filter_map(|rule| {
        let field = rule.field.as_str();
        match (input.get(rule.field), rule.presence) {
          (None, Presence::Required) => Some(FieldError::new(field, rule.missing_message)),
          (None, Presence::WhenPresent) => None,
          (Some(value), _) if !rule.check.passes(value) => Some(FieldError::new(field, rule.invalid_message)),
          (Some(_), _) => None,
        }
      })
      .collect();

    debug!(failures = failures.len(), "Field validation finished.");
    failures
  }
}
