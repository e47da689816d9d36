// catalog_core/src/validation/rules.rs

//! Per-operation rule sets. Rule sets are plain values handed to the validator.

use crate::model::ProductField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
  /// Absence is a failure.
  Required,
  /// The check only runs when the field was submitted.
  WhenPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
  /// Not blank after trimming.
  NonEmpty,
  /// Optional sign, digits, optional fractional part.
  Numeric,
}

impl FieldCheck {
  pub fn passes(&self, value: &str) -> bool {
    match self {
      FieldCheck::NonEmpty => !value.trim().is_empty(),
      FieldCheck::Numeric => is_numeric(value),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
  pub field: ProductField,
  pub presence: Presence,
  pub check: FieldCheck,
  pub missing_message: &'static str,
  pub invalid_message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
  pub name: &'static str,
  pub rules: Vec<FieldRule>,
}

impl RuleSet {
  fn product_rules(name: &'static str, presence: Presence) -> Self {
    Self {
      name,
      rules: vec![
        FieldRule {
          field: ProductField::Name,
          presence,
          check: FieldCheck::NonEmpty,
          missing_message: "name is required",
          invalid_message: "name must not be empty",
        },
        FieldRule {
          field: ProductField::Price,
          presence,
          check: FieldCheck::Numeric,
          missing_message: "price is required",
          invalid_message: "price must be numeric",
        },
      ],
    }
  }

  /// `name` and `price` must both be submitted and valid.
  pub fn create() -> Self {
    Self::product_rules("create", Presence::Required)
  }

  /// Same checks as `create`, but only for fields that were submitted.
  pub fn update() -> Self {
    Self::product_rules("update", Presence::WhenPresent)
  }
}

/// Accepts `10`, `-3`, `+2`, `49.99`, `.5`; rejects `abc`, `5.`, `1e3`, `""`, ` 1`.
pub fn is_numeric(value: &str) -> bool {
  let unsigned = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);
  let (int_part, frac_part) = match unsigned.split_once('.') {
    Some((int_part, frac_part)) => (int_part, Some(frac_part)),
    None => (unsigned, None),
  };
  let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

  match frac_part {
    Some(frac) => !frac.is_empty() && all_digits(frac) && all_digits(int_part),
    None => !int_part.is_empty() && all_digits(int_part),
  }
}
