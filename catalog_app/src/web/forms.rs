// catalog_app/src/web/forms.rs

//! Reading product input out of request bodies.

use crate::errors::{AppError, Result};
use actix_multipart::Multipart;
use actix_web::web;
use catalog_core::{ProductField, ProductFields, UploadedFile};
use futures_util::{StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::{debug, warn};

/// Name of the multipart part carrying the product image.
pub const IMAGE_FIELD: &str = "productImage";

/// Cap on a single text part or a JSON body.
const MAX_TEXT_BYTES: usize = 64 * 1024;

#[derive(Debug, Default)]
pub struct ProductForm {
  pub fields: ProductFields,
  pub file: Option<UploadedFile>,
}

/// Collects text parts into `ProductFields` and the `productImage` part into
/// an `UploadedFile`. A file part with no bytes counts as "no file".
///
/// Parts other than `name`, `price` and `productImage` are drained without
/// being kept. The whole form may not exceed `max_upload_bytes + MAX_TEXT_BYTES`.
pub async fn read_product_form(mut payload: Multipart, max_upload_bytes: usize) -> Result<ProductForm> {
  let form_limit = max_upload_bytes.saturating_add(MAX_TEXT_BYTES);
  let mut form_bytes = 0usize;
  let mut pairs: Vec<(String, String)> = Vec::new();
  let mut ignored: Vec<String> = Vec::new();
  let mut file: Option<UploadedFile> = None;

  while let Some(mut field) = payload.try_next().await? {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };
    let original_name = field
      .content_disposition()
      .and_then(|cd| cd.get_filename())
      .map(str::to_owned);
    let content_type = field.content_type().map(|m| m.to_string());

    let is_image = name == IMAGE_FIELD;
    let keep = is_image || (original_name.is_none() && ProductField::from_key(&name).is_some());
    let limit = if is_image { max_upload_bytes } else { MAX_TEXT_BYTES };
    let mut bytes = Vec::new();
    let mut part_bytes = 0usize;
    while let Some(chunk) = field.try_next().await? {
      part_bytes += chunk.len();
      form_bytes += chunk.len();
      if form_bytes > form_limit {
        return Err(too_large("body", form_limit));
      }
      if keep {
        if part_bytes > limit {
          return Err(too_large(&name, limit));
        }
        bytes.extend_from_slice(&chunk);
      }
    }

    if is_image {
      if bytes.is_empty() || file.is_some() {
        continue;
      }
      let original_name = original_name.unwrap_or_else(|| IMAGE_FIELD.to_string());
      debug!(%original_name, size = bytes.len(), "Received product image part.");
      file = Some(UploadedFile::new(original_name, content_type, bytes));
    } else if original_name.is_some() {
      warn!(field = %name, "Ignoring unexpected file part.");
    } else if keep {
      let text = String::from_utf8(bytes).map_err(|_| AppError::invalid(&name, format!("{} must be UTF-8 text", name)))?;
      pairs.push((name, text));
    } else {
      ignored.push(name);
    }
  }

  let mut fields = ProductFields::from_pairs(pairs);
  fields.ignored.extend(ignored);
  Ok(ProductForm { fields, file })
}

/// Reads a JSON object body into `ProductFields`. An empty body is an empty change set.
pub async fn read_json_fields(mut payload: web::Payload) -> Result<ProductFields> {
  let mut body = Vec::new();
  while let Some(chunk) = payload.next().await {
    let chunk = chunk?;
    if body.len() + chunk.len() > MAX_TEXT_BYTES {
      return Err(too_large("body", MAX_TEXT_BYTES));
    }
    body.extend_from_slice(&chunk);
  }

  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(ProductFields::default());
  }
  match serde_json::from_slice::<Value>(&body) {
    Ok(Value::Object(map)) => Ok(ProductFields::from_json(&map)),
    Ok(_) => Err(AppError::invalid("body", "request body must be a JSON object")),
    Err(e) => Err(AppError::invalid("body", format!("malformed JSON body: {}", e))),
  }
}

fn too_large(field: &str, limit: usize) -> AppError {
  AppError::invalid(field, format!("{} exceeds the {} byte limit", field, limit))
}
