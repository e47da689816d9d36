// catalog_app/src/storage/local_disk.rs

use anyhow::{bail, Context};
use async_trait::async_trait;
use catalog_core::{ImageBackend, StorageMode, UploadedFile};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Writes images under a directory on the server's disk. References are bare
/// generated filenames, served back at `/uploads/{filename}`.
#[derive(Debug, Clone)]
pub struct LocalDiskBackend {
  root: PathBuf,
}

impl LocalDiskBackend {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of a stored image, or `None` when `filename` is not a bare
  /// filename this backend could have generated.
  pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
    is_plain_filename(filename).then(|| self.root.join(filename))
  }

  fn generate_filename(file: &UploadedFile) -> String {
    let stem = format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple());
    match file.extension() {
      Some(ext) => format!("{}.{}", stem, ext),
      None => stem,
    }
  }
}

fn is_plain_filename(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

#[async_trait]
impl ImageBackend for LocalDiskBackend {
  fn mode(&self) -> StorageMode {
    StorageMode::Local
  }

  #[instrument(name = "LocalDiskBackend::store", skip(self, file), fields(root = %self.root.display(), bytes = file.len()))]
  async fn store(&self, file: &UploadedFile) -> anyhow::Result<String> {
    tokio::fs::create_dir_all(&self.root)
      .await
      .with_context(|| format!("Failed to create upload directory {}", self.root.display()))?;

    let filename = Self::generate_filename(file);
    let path = self.root.join(&filename);
    tokio::fs::write(&path, &file.bytes)
      .await
      .with_context(|| format!("Failed to write image to {}", path.display()))?;

    debug!(%filename, "Image written to disk.");
    Ok(filename)
  }

  #[instrument(name = "LocalDiskBackend::discard", skip(self))]
  async fn discard(&self, reference: &str) -> anyhow::Result<()> {
    let Some(path) = self.path_for(reference) else {
      bail!("'{}' is not a stored image filename", reference);
    };
    match tokio::fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
  }
}
