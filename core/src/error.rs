// catalog_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

use crate::validation::FieldError;

/// Framework-level failures raised by the pipeline engine itself
/// (as opposed to failures raised by step handlers).
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Error in step handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error for step '{step_name}': {message}")]
  ConfigurationError { step_name: String, message: String },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for PipelineError {
  fn from(err: AnyhowError) -> Self {
    PipelineError::HandlerError { source: err }
  }
}

pub type PipelineOutcome<T, E = PipelineError> = std::result::Result<T, E>;

/// Every failure a product operation can surface to its caller.
#[derive(Debug, Error)]
pub enum CatalogError {
  /// Client input was malformed. Carries the ordered field failures.
  #[error("Validation failed for {} field(s)", .0.len())]
  Validation(Vec<FieldError>),

  #[error("Product with ID {id} not found")]
  NotFound { id: Uuid },

  /// The store rejected or failed an operation. The message is forwarded verbatim.
  #[error("{0}")]
  Persistence(String),

  /// The storage backend failed while transmitting or writing image bytes.
  #[error("Image upload failed: {0}")]
  Upload(String),

  #[error("Product pipeline error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },

  #[error("Internal error: {0}")]
  Internal(String),
}

impl CatalogError {
  /// Convenience constructor for a single-field validation failure.
  pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
    CatalogError::Validation(vec![FieldError::new(field, message)])
  }

  pub fn field_errors(&self) -> Option<&[FieldError]> {
    match self {
      CatalogError::Validation(errors) => Some(errors),
      _ => None,
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
