// catalog_app/src/storage/object_store.rs

use crate::config::{CloudStorageConfig, Secret};
use crate::errors::{AppError, Result};
use anyhow::{bail, Context};
use async_trait::async_trait;
use catalog_core::{ImageBackend, StorageMode, UploadedFile};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Uploads images to an HTTP object store with `PUT {endpoint}/{bucket}/{key}`
/// and hands back `{public_base_url}/{key}`.
#[derive(Debug, Clone)]
pub struct ObjectStoreBackend {
  client: reqwest::Client,
  endpoint: String,
  bucket: String,
  access_token: Option<Secret>,
  public_base_url: String,
}

impl ObjectStoreBackend {
  pub fn new(config: &CloudStorageConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build object store client: {}", e)))?;

    Ok(Self {
      client,
      endpoint: config.endpoint.clone(),
      bucket: config.bucket.clone(),
      access_token: config.access_token.clone(),
      public_base_url: config.public_base_url.clone(),
    })
  }

  fn object_url(&self, key: &str) -> String {
    format!("{}/{}/{}", self.endpoint, self.bucket, key)
  }

  fn object_key(file: &UploadedFile) -> String {
    let ext = file.extension().unwrap_or_else(|| "bin".to_string());
    format!("products/{}.{}", Uuid::new_v4(), ext)
  }

  /// Key of a URL this backend handed out.
  fn key_of<'a>(&self, reference: &'a str) -> Option<&'a str> {
    reference
      .strip_prefix(self.public_base_url.as_str())?
      .strip_prefix('/')
      .filter(|key| !key.is_empty())
  }

  fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.access_token {
      Some(token) => request.bearer_auth(token.expose()),
      None => request,
    }
  }
}

fn content_type_of(file: &UploadedFile) -> String {
  file
    .content_type
    .clone()
    .unwrap_or_else(|| mime_guess::from_path(&file.original_name).first_or_octet_stream().to_string())
}

#[async_trait]
impl ImageBackend for ObjectStoreBackend {
  fn mode(&self) -> StorageMode {
    StorageMode::Cloud
  }

  #[instrument(name = "ObjectStoreBackend::store", skip(self, file), fields(bucket = %self.bucket, bytes = file.len()))]
  async fn store(&self, file: &UploadedFile) -> anyhow::Result<String> {
    let key = Self::object_key(file);
    let request = self
      .client
      .put(self.object_url(&key))
      .header(CONTENT_TYPE, content_type_of(file))
      .body(file.bytes.clone());

    let response = self
      .authorized(request)
      .send()
      .await
      .context("Object store request failed")?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      bail!("Object store rejected upload with {}: {}", status, body.trim());
    }

    let url = format!("{}/{}", self.public_base_url, key);
    info!(%url, "Image uploaded to object store.");
    Ok(url)
  }

  #[instrument(name = "ObjectStoreBackend::discard", skip(self))]
  async fn discard(&self, reference: &str) -> anyhow::Result<()> {
    let Some(key) = self.key_of(reference) else {
      bail!("'{}' was not issued by this object store", reference);
    };

    let response = self
      .authorized(self.client.delete(self.object_url(key)))
      .send()
      .await
      .context("Object store delete request failed")?;
    match response.status() {
      status if status.is_success() || status == StatusCode::NOT_FOUND => Ok(()),
      status => bail!("Object store refused delete with {}", status),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn backend() -> ObjectStoreBackend {
    ObjectStoreBackend::new(&CloudStorageConfig {
      endpoint: "https://objects.example.test".to_string(),
      bucket: "catalog".to_string(),
      access_token: Some(Secret::new("token")),
      public_base_url: "https://cdn.example.test/catalog".to_string(),
      timeout_secs: 5,
    })
    .unwrap()
  }

  #[test]
  fn keys_are_recovered_only_from_issued_urls() {
    let backend = backend();
    assert_eq!(
      backend.key_of("https://cdn.example.test/catalog/products/a.png"),
      Some("products/a.png")
    );
    assert_eq!(backend.key_of("https://elsewhere.test/catalog/products/a.png"), None);
    assert_eq!(backend.key_of("https://cdn.example.test/catalog/"), None);
    assert_eq!(
      backend.object_url("products/a.png"),
      "https://objects.example.test/catalog/products/a.png"
    );
  }

  #[test]
  fn object_keys_keep_a_sanitized_extension() {
    let with_ext = UploadedFile::new("Chair.PNG", None, vec![1]);
    let without_ext = UploadedFile::new("chair", None, vec![1]);

    assert!(ObjectStoreBackend::object_key(&with_ext).starts_with("products/"));
    assert!(ObjectStoreBackend::object_key(&with_ext).ends_with(".png"));
    assert!(ObjectStoreBackend::object_key(&without_ext).ends_with(".bin"));
    assert_eq!(content_type_of(&with_ext), "image/png");
  }

  #[test]
  fn access_token_is_not_printed() {
    let printed = format!("{:?}", backend());
    assert!(printed.contains("[REDACTED]"));
    assert!(!printed.contains("\"token\""));
  }
}
