// tests/common/mod.rs
#![allow(dead_code)]

use catalog_app::{AppConfig, AppState};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "----catalog-test-boundary";

pub fn config_from(vars: &[(&str, &str)]) -> catalog_app::Result<AppConfig> {
  let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  AppConfig::from_vars(|name| vars.get(name).cloned())
}

/// State over the in-memory store with local images under a fresh temp dir.
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn memory_state(max_upload_bytes: usize) -> (AppState, TempDir) {
  let upload_dir = tempfile::tempdir().unwrap();
  let dir = upload_dir.path().to_string_lossy().to_string();
  let max = max_upload_bytes.to_string();
  let config = config_from(&[
    ("PRODUCT_STORE", "memory"),
    ("STORAGE_MODE", "local"),
    ("UPLOAD_DIR", dir.as_str()),
    ("MAX_UPLOAD_BYTES", max.as_str()),
  ])
  .unwrap();
  let state = AppState::build(Arc::new(config)).await.unwrap();
  (state, upload_dir)
}

/// Encodes text fields and an optional `(field, filename, content_type, bytes)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &str, &[u8])>) -> (String, Vec<u8>) {
  let mut body = Vec::new();
  for (name, value) in fields {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
  }
  if let Some((name, filename, content_type, bytes)) = file {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
      format!(
        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        name, filename, content_type
      )
      .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
