// catalog_core/src/upload/resolver.rs

use super::backend::ImageBackend;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{ImageRef, StorageMode, UploadedFile};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Resolves an optional upload to a canonical image reference using the
/// backend configured for the deployment's storage mode.
pub struct UploadResolver {
  mode: StorageMode,
  backend: Arc<dyn ImageBackend>,
}

impl std::fmt::Debug for UploadResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("UploadResolver").field("mode", &self.mode).finish()
  }
}

impl UploadResolver {
  /// Fails when the backend serves a different mode than the one configured.
  pub fn new(mode: StorageMode, backend: Arc<dyn ImageBackend>) -> CatalogResult<Self> {
    if backend.mode() != mode {
      return Err(CatalogError::Internal(format!(
        "upload backend serves '{}' storage but '{}' is configured",
        backend.mode(),
        mode
      )));
    }
    Ok(Self { mode, backend })
  }

  pub fn mode(&self) -> StorageMode {
    self.mode
  }

  /// No file yields `ImageRef::None`. Otherwise the bytes are written through the
  /// backend, and a backend failure yields `ImageRef::Failed` rather than `None`.
  #[instrument(name = "UploadResolver::resolve", skip(self, file), fields(mode = %self.mode, has_file = file.is_some()))]
  pub async fn resolve(&self, file: Option<&UploadedFile>) -> ImageRef {
    let Some(file) = file else {
      return ImageRef::None;
    };

    let outcome = self.backend.store(file).await.map_err(|e| {
      error!(error = %e, original_name = %file.original_name, "Image backend failed to store upload.");
      format!("{:#}", e)
    });

    let image = match self.mode {
      StorageMode::Cloud => ImageRef::from_outcomes(Some(outcome), None),
      StorageMode::Local => ImageRef::from_outcomes(None, Some(outcome)),
    };
    if let Some(reference) = image.reference() {
      info!(%reference, bytes = file.len(), "Image upload stored.");
    }
    image
  }

  /// Removes a stored image; used to compensate a create that did not commit.
  #[instrument(name = "UploadResolver::discard", skip(self), err(Display))]
  pub async fn discard(&self, reference: &str) -> CatalogResult<()> {
    self
      .backend
      .discard(reference)
      .await
      .map_err(|e| CatalogError::Upload(format!("could not discard '{}': {:#}", reference, e)))
  }
}
