// catalog_core/src/store/mod.rs

//! The persistence seam. The service only ever talks to `dyn ProductStore`.

pub mod memory;

use crate::error::CatalogResult;
use crate::model::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::InMemoryProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
  /// Inserts the record and stamps `created_at`/`updated_at`.
  async fn create(&self, record: NewProduct) -> CatalogResult<Product>;

  /// Every product, newest `created_at` first.
  async fn find_all(&self) -> CatalogResult<Vec<Product>>;

  async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

  /// Applies the present fields of `changes` and bumps `updated_at`.
  /// `Ok(None)` when no product has this id.
  async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<Option<Product>>;

  /// Returns the number of rows removed (0 or 1).
  async fn delete_by_id(&self, id: Uuid) -> CatalogResult<u64>;
}
