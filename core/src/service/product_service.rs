// catalog_core/src/service/product_service.rs

use super::contexts::{CreateProductCtxData, UpdateProductCtxData};
use super::create_pipeline::build_create_pipeline;
use super::update_pipeline::build_update_pipeline;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductFields, UploadedFile};
use crate::pipeline::{ContextData, PipelineRegistry, PipelineResult};
use crate::store::ProductStore;
use crate::upload::UploadResolver;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// The product operations. Each call is an independent pipeline run; the
/// service itself holds no per-request state.
pub struct ProductService {
  store: Arc<dyn ProductStore>,
  resolver: Arc<UploadResolver>,
  pipelines: PipelineRegistry<CatalogError>,
}

impl std::fmt::Debug for ProductService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProductService")
      .field("resolver", &self.resolver)
      .finish_non_exhaustive()
  }
}

impl ProductService {
  pub fn new(store: Arc<dyn ProductStore>, resolver: Arc<UploadResolver>) -> Self {
    let pipelines = PipelineRegistry::<CatalogError>::new();
    pipelines.register_pipeline(build_create_pipeline());
    pipelines.register_pipeline(build_update_pipeline());
    info!(storage_mode = %resolver.mode(), "Product service ready.");
    Self {
      store,
      resolver,
      pipelines,
    }
  }

  #[instrument(name = "ProductService::create", skip_all, fields(has_file = file.is_some()), err(Display))]
  pub async fn create(&self, fields: ProductFields, file: Option<UploadedFile>) -> CatalogResult<Product> {
    let ctx_data = ContextData::new(CreateProductCtxData::new(
      self.store.clone(),
      self.resolver.clone(),
      fields,
      file,
    ));

    match self.pipelines.run(ctx_data.clone()).await? {
      PipelineResult::Completed => {}
      PipelineResult::Stopped => {
        return Err(CatalogError::Internal("create pipeline stopped before persisting".to_string()));
      }
    }

    let created = ctx_data.write().created.take();
    created.ok_or_else(|| CatalogError::Internal("create pipeline completed without a product".to_string()))
  }

  #[instrument(name = "ProductService::list", skip_all, err(Display))]
  pub async fn list(&self) -> CatalogResult<Vec<Product>> {
    self.store.find_all().await
  }

  /// `Ok(None)` is the not-found outcome; it is not an error.
  #[instrument(name = "ProductService::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    self.store.find_by_id(id).await
  }

  /// `Ok(None)` when no product has this id.
  #[instrument(name = "ProductService::update_by_id", skip(self, fields), err(Display))]
  pub async fn update_by_id(&self, id: Uuid, fields: ProductFields) -> CatalogResult<Option<Product>> {
    let ctx_data = ContextData::new(UpdateProductCtxData::new(self.store.clone(), id, fields));
    self.pipelines.run(ctx_data.clone()).await?;

    let updated = ctx_data.write().updated.take();
    Ok(updated)
  }

  /// Unlike `get_by_id`, an unknown id is reported as `CatalogError::NotFound`.
  #[instrument(name = "ProductService::delete_by_id", skip(self), err(Display))]
  pub async fn delete_by_id(&self, id: Uuid) -> CatalogResult<()> {
    let deleted = self.store.delete_by_id(id).await?;
    if deleted == 0 {
      warn!(product_id = %id, "Delete matched no product.");
      return Err(CatalogError::NotFound { id });
    }
    info!(product_id = %id, "Product deleted.");
    Ok(())
  }
}
