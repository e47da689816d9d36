// catalog_core/src/transform.rs

//! Turns validated input into the shapes the store persists.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{ImageRef, NewProduct, ProductChanges, ProductField, ProductFields};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductTransformer;

impl ProductTransformer {
  /// Builds the record for a new product: fresh id, lower-cased name,
  /// parsed price, resolved image reference and `expiry_date = now`.
  ///
  /// `fields` must already have passed the create rule set.
  pub fn for_create(&self, fields: &ProductFields, image: &ImageRef) -> CatalogResult<NewProduct> {
    log_ignored(fields);

    let name = fields
      .name
      .as_deref()
      .ok_or_else(|| CatalogError::invalid_field(ProductField::Name.as_str(), "name is required"))?;
    let price = fields
      .price
      .as_deref()
      .ok_or_else(|| CatalogError::invalid_field(ProductField::Price.as_str(), "price is required"))?;

    let record = NewProduct {
      id: Uuid::new_v4(),
      name: name.to_lowercase(),
      price: parse_price(price)?,
      product_image: image.reference().map(str::to_owned),
      expiry_date: Utc::now(),
    };
    debug!(product_id = %record.id, "Product record prepared.");
    Ok(record)
  }

  /// Builds a partial update. Only `name` is normalized; absent fields stay absent.
  pub fn for_update(&self, fields: &ProductFields) -> CatalogResult<ProductChanges> {
    log_ignored(fields);

    Ok(ProductChanges {
      name: fields.name.as_deref().map(str::to_lowercase),
      price: fields.price.as_deref().map(parse_price).transpose()?,
    })
  }
}

/// Parses a price that already passed the numeric check.
///
/// Values that `Decimal` cannot hold exactly are rejected rather than rounded.
pub fn parse_price(raw: &str) -> CatalogResult<Decimal> {
  let (negative, unsigned) = match raw.as_bytes().first() {
    Some(b'-') => (true, &raw[1..]),
    Some(b'+') => (false, &raw[1..]),
    _ => (false, raw),
  };
  let normalized = if unsigned.starts_with('.') {
    format!("0{}", unsigned)
  } else {
    unsigned.to_string()
  };

  let value = Decimal::from_str_exact(&normalized)
    .map_err(|e| CatalogError::invalid_field(ProductField::Price.as_str(), format!("price is out of range: {}", e)))?;
  Ok(if negative && !value.is_zero() { -value } else { value })
}

fn log_ignored(fields: &ProductFields) {
  if !fields.ignored.is_empty() {
    warn!(ignored_fields = ?fields.ignored, "Ignoring fields that are not part of a product.");
  }
}
