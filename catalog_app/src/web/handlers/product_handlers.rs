// catalog_app/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::forms::{read_json_fields, read_product_form};

fn product_not_found(id: Uuid) -> AppError {
  AppError::NotFound(format!("Product with ID {} not found", id))
}

fn is_multipart(req: &HttpRequest) -> bool {
  req
    .headers()
    .get(CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .map_or(false, |ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(app_state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse, AppError> {
  let form = read_product_form(payload, app_state.config.max_upload_bytes).await?;
  let product = app_state.product_service.create(form.fields, form.file).await?;

  info!(product_id = %product.id, "Product created.");
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.product_service.list().await?;

  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  match app_state.product_service.get_by_id(product_id).await? {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(product_not_found(product_id))
    }
  }
}

/// Accepts a JSON object or a multipart form. Images are not replaced on update.
#[instrument(name = "handler::update_product", skip(app_state, path, req, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  req: HttpRequest,
  payload: web::Payload,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let fields = if is_multipart(&req) {
    let form = read_product_form(Multipart::new(req.headers(), payload), app_state.config.max_upload_bytes).await?;
    if form.file.is_some() {
      warn!("Ignoring image sent with a product update.");
    }
    form.fields
  } else {
    read_json_fields(payload).await?
  };

  match app_state.product_service.update_by_id(product_id, fields).await? {
    Some(product) => {
      info!("Product {} updated.", product_id);
      Ok(HttpResponse::Ok().json(product))
    }
    None => {
      warn!("Product with ID {} not found for update.", product_id);
      Err(product_not_found(product_id))
    }
  }
}

/// An unknown id answers 500 with the not-found message, unlike GET.
#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
  app_state.product_service.delete_by_id(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
