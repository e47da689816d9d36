// catalog_core/src/model/image.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One uploaded file as received from the client.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
  pub original_name: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

impl UploadedFile {
  pub fn new(original_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
    Self {
      original_name: original_name.into(),
      content_type,
      bytes,
    }
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Lower-cased alphanumeric extension of the original name, if any.
  pub fn extension(&self) -> Option<String> {
    let (_, ext) = self.original_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
      return None;
    }
    Some(ext)
  }
}

impl fmt::Debug for UploadedFile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UploadedFile")
      .field("original_name", &self.original_name)
      .field("content_type", &self.content_type)
      .field("len", &self.bytes.len())
      .finish()
  }
}

/// Deployment-level choice of upload backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
  Local,
  Cloud,
}

impl StorageMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      StorageMode::Local => "local",
      StorageMode::Cloud => "cloud",
    }
  }
}

impl fmt::Display for StorageMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for StorageMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "local" => Ok(StorageMode::Local),
      "cloud" => Ok(StorageMode::Cloud),
      other => Err(format!("unknown storage mode '{}', expected 'local' or 'cloud'", other)),
    }
  }
}

/// The resolved image reference for a product.
///
/// `Failed` keeps an upload failure distinct from "no image was sent".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageRef {
  /// Generated filename under the server's upload directory.
  Local(String),
  /// Publicly resolvable URL in the remote object store.
  Remote(String),
  #[default]
  None,
  Failed(String),
}

impl ImageRef {
  /// Combines the outcomes of the remote and local paths.
  ///
  /// Precedence: remote URL, else local filename, else none. A failure on the
  /// path that was attempted is never masked by the other path.
  pub fn from_outcomes(remote: Option<Result<String, String>>, local: Option<Result<String, String>>) -> Self {
    match (remote, local) {
      (Some(Err(reason)), _) => ImageRef::Failed(reason),
      (Some(Ok(url)), _) if url.trim().is_empty() => {
        ImageRef::Failed("remote store returned an empty URL".to_string())
      }
      (Some(Ok(url)), _) => ImageRef::Remote(url),
      (None, Some(Err(reason))) => ImageRef::Failed(reason),
      (None, Some(Ok(name))) if name.trim().is_empty() => {
        ImageRef::Failed("local store returned an empty filename".to_string())
      }
      (None, Some(Ok(name))) => ImageRef::Local(name),
      (None, None) => ImageRef::None,
    }
  }

  /// The canonical reference string stored on the product.
  pub fn reference(&self) -> Option<&str> {
    match self {
      ImageRef::Local(r) | ImageRef::Remote(r) => Some(r),
      ImageRef::None | ImageRef::Failed(_) => None,
    }
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, ImageRef::Failed(_))
  }
}
