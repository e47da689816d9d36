// catalog_core/src/service/create_pipeline.rs

use super::contexts::CreateProductCtxData;
use crate::error::CatalogError;
use crate::model::ImageRef;
use crate::pipeline::{ContextData, Pipeline, PipelineControl};
use crate::transform::ProductTransformer;
use crate::validation::{FieldValidator, RuleSet};
use tracing::{info, warn};

pub const STAGE_IMAGE_UPLOAD: &str = "stage_image_upload";
pub const VALIDATE_PRODUCT_FIELDS: &str = "validate_product_fields";
pub const TRANSFORM_PRODUCT_RECORD: &str = "transform_product_record";
pub const PERSIST_PRODUCT: &str = "persist_product";

/// upload -> validate -> transform -> persist.
///
/// The upload is staged first. If any later step fails, the rollback handler
/// on the upload step discards the staged image so nothing is left orphaned.
pub fn build_create_pipeline() -> Pipeline<CreateProductCtxData, CatalogError> {
  let mut p = Pipeline::<CreateProductCtxData, CatalogError>::new(&[
    (STAGE_IMAGE_UPLOAD, false, None),
    (VALIDATE_PRODUCT_FIELDS, false, None),
    (TRANSFORM_PRODUCT_RECORD, false, None),
    (PERSIST_PRODUCT, false, None),
  ]);

  p.on_root(STAGE_IMAGE_UPLOAD, |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let (resolver, file) = {
        let guard = ctx_data.read();
        (guard.resolver.clone(), guard.file.clone())
      };

      let image = resolver.resolve(file.as_ref()).await;
      if let ImageRef::Failed(reason) = image {
        return Err(CatalogError::Upload(reason));
      }

      {
        let mut guard = ctx_data.write();
        guard.staged_image = image.reference().map(str::to_owned);
        guard.image = image;
      }
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p.on_rollback(STAGE_IMAGE_UPLOAD, |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let (resolver, staged) = {
        let mut guard = ctx_data.write();
        guard.image = ImageRef::None;
        (guard.resolver.clone(), guard.staged_image.take())
      };
      let Some(reference) = staged else {
        return Ok::<_, CatalogError>(());
      };
      warn!(%reference, "Discarding staged image of a product that was not created.");
      resolver.discard(&reference).await
    })
  });

  p.on_root(VALIDATE_PRODUCT_FIELDS, |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let errors = ctx_data.with_read(|data| FieldValidator.validate(&data.fields, &RuleSet::create()));
      if !errors.is_empty() {
        return Err(CatalogError::Validation(errors));
      }
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p.on_root(TRANSFORM_PRODUCT_RECORD, |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let record = ProductTransformer.for_create(&guard.fields, &guard.image)?;
      guard.record = Some(record);
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p.on_root(PERSIST_PRODUCT, |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let (store, record) = {
        let guard = ctx_data.read();
        (guard.store.clone(), guard.record.clone())
      };
      let record = record.ok_or_else(|| CatalogError::Internal("product record was not prepared".to_string()))?;

      let product = store.create(record).await?;
      info!(product_id = %product.id, "Product persisted.");

      {
        let mut guard = ctx_data.write();
        // Committed: the image now belongs to the product.
        guard.staged_image = None;
        guard.created = Some(product);
      }
      Ok::<_, CatalogError>(PipelineControl::Continue)
    })
  });

  p
}
