// catalog_core/src/service/contexts.rs

//! Data carried through the product pipelines. Handlers receive these wrapped
//! in `ContextData`.

use crate::model::{ImageRef, NewProduct, Product, ProductChanges, ProductFields, UploadedFile};
use crate::store::ProductStore;
use crate::upload::UploadResolver;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CreateProductCtxData {
  pub store: Arc<dyn ProductStore>,
  pub resolver: Arc<UploadResolver>,
  pub fields: ProductFields,
  pub file: Option<UploadedFile>,
  pub image: ImageRef,
  /// Reference of an image written during this run that has not been committed yet.
  pub staged_image: Option<String>,
  pub record: Option<NewProduct>,
  pub created: Option<Product>,
}

impl CreateProductCtxData {
  pub fn new(
    store: Arc<dyn ProductStore>,
    resolver: Arc<UploadResolver>,
    fields: ProductFields,
    file: Option<UploadedFile>,
  ) -> Self {
    Self {
      store,
      resolver,
      fields,
      file,
      image: ImageRef::None,
      staged_image: None,
      record: None,
      created: None,
    }
  }
}

#[derive(Clone)]
pub struct UpdateProductCtxData {
  pub store: Arc<dyn ProductStore>,
  pub product_id: Uuid,
  pub fields: ProductFields,
  pub existing: Option<Product>,
  pub changes: Option<ProductChanges>,
  pub updated: Option<Product>,
}

impl UpdateProductCtxData {
  pub fn new(store: Arc<dyn ProductStore>, product_id: Uuid, fields: ProductFields) -> Self {
    Self {
      store,
      product_id,
      fields,
      existing: None,
      changes: None,
      updated: None,
    }
  }
}
