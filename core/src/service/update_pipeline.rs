// catalog_core/src/service/update_pipeline.rs

use super::contexts::UpdateProductCtxData;
use crate::error::CatalogError;
use crate::pipeline::{ContextData, Pipeline, PipelineControl};
use crate::transform::ProductTransformer;
use crate::validation::{FieldValidator, RuleSet};
use tracing::info;

pub const VALIDATE_PRODUCT_CHANGES: &str = "validate_product_changes";
pub const LOAD_EXISTING_PRODUCT: &str = "load_existing_product";
pub const TRANSFORM_PRODUCT_CHANGES: &str = "transform_product_changes";
pub const PERSIST_PRODUCT_CHANGES: &str = "persist_product_changes";

/// validate -> load -> transform -> persist. An unknown id stops the run
/// after `load_existing_product` and leaves `updated` empty.
pub fn build_update_pipeline() -> Pipeline<UpdateProductCtxData, CatalogError> {
  let mut p = Pipeline::<UpdateProductCtxData, CatalogError>::new(&[
    (VALIDATE_PRODUCT_CHANGES, false, None),
    (LOAD_EXISTING_PRODUCT, false, None),
    (TRANSFORM_PRODUCT_CHANGES, false, None),
    (PERSIST_PRODUCT_CHANGES, false, None),
  ]);

  p.on_root(VALIDATE_PRODUCT_CHANGES, |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let errors = ctx_data.with_read(|data| FieldValidator.validate(&data.fields, &RuleSet::update()));
      if !errors.is_empty() {
        return Err(CatalogError::Validation(errors));
      }
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p.on_root(LOAD_EXISTING_PRODUCT, |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let (store, id) = {
        let guard = ctx_data.read();
        (guard.store.clone(), guard.product_id)
      };

      match store.find_by_id(id).await? {
        Some(existing) => {
          ctx_data.write().existing = Some(existing);
          Ok::<_, CatalogError>(PipelineControl::Continue)
        }
        None => {
          info!(product_id = %id, "No product to update.");
          Ok(PipelineControl::Stop)
        }
      }
    })
  });

  p.on_root(TRANSFORM_PRODUCT_CHANGES, |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let changes = ProductTransformer.for_update(&guard.fields)?;
      guard.changes = Some(changes);
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p.on_root(PERSIST_PRODUCT_CHANGES, |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let (store, id, changes) = {
        let guard = ctx_data.read();
        (guard.store.clone(), guard.product_id, guard.changes.clone().unwrap_or_default())
      };

      // The product may have been deleted between load and write.
      let updated = store.update(id, changes).await?;
      ctx_data.write().updated = updated;
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p
}
