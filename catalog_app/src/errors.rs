// catalog_app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog_core::{CatalogError, FieldError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Request-level input problems found before the product pipeline runs
  /// (malformed multipart, oversized image, non-object JSON body).
  #[error("Validation Error: {} field(s) rejected", .0.len())]
  Validation(Vec<FieldError>),

  /// Rendered as a plain-text 404, never as an error body.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("{source}")]
  Catalog {
    #[from]
    source: CatalogError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn invalid(field: &str, message: impl Into<String>) -> Self {
    AppError::Validation(vec![FieldError::new(field, message)])
  }
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::invalid("body", format!("Invalid multipart request: {}", err))
  }
}

impl From<actix_web::error::PayloadError> for AppError {
  fn from(err: actix_web::error::PayloadError) -> Self {
    AppError::invalid("body", format!("Could not read request body: {}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Catalog {
        source: CatalogError::Validation(_),
      } => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(errors)
      | AppError::Catalog {
        source: CatalogError::Validation(errors),
      } => {
        tracing::warn!(failures = ?errors, "Rejecting invalid product input.");
        HttpResponse::BadRequest().json(json!({ "errors": errors }))
      }
      AppError::NotFound(m) => HttpResponse::NotFound().content_type("text/plain; charset=utf-8").body(m.clone()),
      AppError::Catalog { source } => {
        tracing::error!(catalog_error = ?source, "Responding with error");
        HttpResponse::InternalServerError().json(json!({ "message": source.to_string() }))
      }
      other => {
        tracing::error!(application_error = %other, "Responding with error");
        HttpResponse::InternalServerError().json(json!({ "message": other.to_string() }))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
