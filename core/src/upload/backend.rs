// catalog_core/src/upload/backend.rs

use crate::model::{StorageMode, UploadedFile};
use async_trait::async_trait;

/// A place image bytes can be written to and removed from.
///
/// Implementations live with the application (local disk, remote object store)
/// and in tests.
#[async_trait]
pub trait ImageBackend: Send + Sync + 'static {
  /// The storage mode this backend serves.
  fn mode(&self) -> StorageMode;

  /// Persists `file` and returns its reference: a generated filename for local
  /// storage, a public URL for remote storage.
  async fn store(&self, file: &UploadedFile) -> anyhow::Result<String>;

  /// Removes a previously stored image by the reference `store` returned.
  async fn discard(&self, reference: &str) -> anyhow::Result<()>;
}
