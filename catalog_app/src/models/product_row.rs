// catalog_app/src/models/product_row.rs

use catalog_core::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub product_image: Option<String>,
  pub expiry_date: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      price: row.price,
      product_image: row.product_image,
      expiry_date: row.expiry_date,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}
