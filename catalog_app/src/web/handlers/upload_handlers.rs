// catalog_app/src/web/handlers/upload_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{debug, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// Serves a locally stored product image read-only.
#[instrument(name = "handler::serve_upload", skip(app_state))]
pub async fn serve_upload_handler(app_state: web::Data<AppState>, filename: web::Path<String>) -> Result<HttpResponse, AppError> {
  let not_found = || AppError::NotFound("Image not found".to_string());

  let path = app_state
    .local_images
    .as_ref()
    .and_then(|images| images.path_for(&filename))
    .ok_or_else(not_found)?;

  let bytes = match tokio::fs::read(&path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
    Err(e) => return Err(AppError::Internal(format!("Failed to read image: {}", e))),
  };

  let content_type = mime_guess::from_path(&path).first_or_octet_stream();
  debug!(size = bytes.len(), %content_type, "Serving stored image.");
  Ok(
    HttpResponse::Ok()
      .content_type(content_type.to_string())
      .insert_header(("Cache-Control", "public, max-age=86400"))
      .body(bytes),
  )
}
