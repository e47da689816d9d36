// catalog_app/src/state.rs
use crate::config::{AppConfig, ProductStoreKind};
use crate::db::{self, PgProductStore};
use crate::errors::{AppError, Result};
use crate::storage::{LocalDiskBackend, ObjectStoreBackend};
use catalog_core::{ImageBackend, InMemoryProductStore, ProductService, ProductStore, StorageMode, UploadResolver};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub product_service: Arc<ProductService>,
  pub config: Arc<AppConfig>,
  /// Present in local storage mode; serves `/uploads/{filename}`.
  pub local_images: Option<LocalDiskBackend>,
}

impl AppState {
  /// Wires the configured store and image backend into a `ProductService`.
  pub async fn build(config: Arc<AppConfig>) -> Result<Self> {
    let store: Arc<dyn ProductStore> = match config.product_store {
      ProductStoreKind::Postgres => Arc::new(PgProductStore::new(db::connect(&config).await?)),
      ProductStoreKind::Memory => {
        tracing::warn!("Using the in-memory product store; products are lost on restart.");
        Arc::new(InMemoryProductStore::new())
      }
    };

    let (backend, local_images): (Arc<dyn ImageBackend>, Option<LocalDiskBackend>) = match config.storage_mode {
      StorageMode::Local => {
        let local = LocalDiskBackend::new(&config.upload_dir);
        (Arc::new(local.clone()), Some(local))
      }
      StorageMode::Cloud => {
        let cloud = config
          .cloud
          .as_ref()
          .ok_or_else(|| AppError::Config("cloud storage selected without cloud settings".to_string()))?;
        (Arc::new(ObjectStoreBackend::new(cloud)?), None)
      }
    };

    let resolver = UploadResolver::new(config.storage_mode, backend)?;
    Ok(Self {
      product_service: Arc::new(ProductService::new(store, Arc::new(resolver))),
      config,
      local_images,
    })
  }
}
