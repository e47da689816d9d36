// catalog_core/src/store/memory.rs

use super::ProductStore;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A process-local store. Products are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
  products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
  async fn create(&self, record: NewProduct) -> CatalogResult<Product> {
    let mut products = self.products.write();
    if products.iter().any(|p| p.id == record.id) {
      return Err(CatalogError::Persistence(format!(
        "duplicate key value violates unique constraint: id {}",
        record.id
      )));
    }

    let now = Utc::now();
    let product = Product {
      id: record.id,
      name: record.name,
      price: record.price,
      product_image: record.product_image,
      expiry_date: record.expiry_date,
      created_at: now,
      updated_at: now,
    };
    products.push(product.clone());
    debug!(product_id = %product.id, total = products.len(), "Product inserted in memory.");
    Ok(product)
  }

  async fn find_all(&self) -> CatalogResult<Vec<Product>> {
    let mut all: Vec<Product> = self.products.read().iter().rev().cloned().collect();
    // Stable sort: products created in the same instant keep latest-inserted first.
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(all)
  }

  async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    Ok(self.products.read().iter().find(|p| p.id == id).cloned())
  }

  async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<Option<Product>> {
    let mut products = self.products.write();
    let Some(product) = products.iter_mut().find(|p| p.id == id) else {
      return Ok(None);
    };
    changes.apply_to(product);
    product.updated_at = Utc::now();
    Ok(Some(product.clone()))
  }

  async fn delete_by_id(&self, id: Uuid) -> CatalogResult<u64> {
    let mut products = self.products.write();
    let before = products.len();
    products.retain(|p| p.id != id);
    Ok((before - products.len()) as u64)
  }
}
