// catalog_app/src/db/product_store.rs

use crate::models::ProductRow;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, NewProduct, Product, ProductChanges, ProductStore};
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, price, product_image, expiry_date, created_at, updated_at";

/// `ProductStore` over the Postgres `products` table, using runtime queries.
#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn persistence_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CatalogError {
  move |e| {
    error!(operation, error = %e, "Product query failed.");
    CatalogError::Persistence(e.to_string())
  }
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "PgProductStore::create", skip(self, record), fields(product_id = %record.id))]
  async fn create(&self, record: NewProduct) -> CatalogResult<Product> {
    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products (id, name, price, product_image, expiry_date) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(record.id)
    .bind(&record.name)
    .bind(record.price)
    .bind(&record.product_image)
    .bind(record.expiry_date)
    .fetch_one(&self.pool)
    .await
    .map_err(persistence_error("insert"))?;

    info!("Product row inserted.");
    Ok(row.into())
  }

  #[instrument(name = "PgProductStore::find_all", skip(self))]
  async fn find_all(&self) -> CatalogResult<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {} FROM products ORDER BY created_at DESC",
      PRODUCT_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await
    .map_err(persistence_error("select_all"))?;

    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "PgProductStore::find_by_id", skip(self))]
  async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(persistence_error("select_one"))?;

    Ok(row.map(Product::from))
  }

  #[instrument(name = "PgProductStore::update", skip(self, changes))]
  async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<Option<Product>> {
    // COALESCE keeps the stored value for every field left out of the change set.
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "UPDATE products SET name = COALESCE($2, name), price = COALESCE($3, price), updated_at = now() \
       WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(id)
    .bind(changes.name)
    .bind(changes.price)
    .fetch_optional(&self.pool)
    .await
    .map_err(persistence_error("update"))?;

    Ok(row.map(Product::from))
  }

  #[instrument(name = "PgProductStore::delete_by_id", skip(self))]
  async fn delete_by_id(&self, id: Uuid) -> CatalogResult<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(persistence_error("delete"))?;

    Ok(result.rows_affected())
  }
}
