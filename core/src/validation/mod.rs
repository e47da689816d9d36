// catalog_core/src/validation/mod.rs

pub mod rules;
pub mod validator;

pub use rules::{is_numeric, FieldCheck, FieldRule, Presence, RuleSet};
pub use validator::{FieldError, FieldValidator};
