// catalog_app/src/config.rs

use crate::errors::{AppError, Result};
use catalog_core::StorageMode;
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A value that must never show up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
  pub fn new(value: impl Into<String>) -> Self {
    Secret(value.into())
  }

  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Secret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[REDACTED]")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStoreKind {
  Postgres,
  Memory,
}

impl FromStr for ProductStoreKind {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" => Ok(ProductStoreKind::Postgres),
      "memory" => Ok(ProductStoreKind::Memory),
      other => Err(format!("unknown product store '{}', expected 'postgres' or 'memory'", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl LogFormat {
  /// Reads `LOG_FORMAT` leniently; used before the full configuration is loaded.
  pub fn from_env() -> Self {
    env::var("LOG_FORMAT")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or_default()
  }
}

impl FromStr for LogFormat {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(format!("unknown log format '{}', expected 'pretty' or 'json'", other)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct CloudStorageConfig {
  pub endpoint: String,
  pub bucket: String,
  pub access_token: Option<Secret>,
  /// Prefix of the URLs handed back to clients.
  pub public_base_url: String,
  pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  pub product_store: ProductStoreKind,
  pub database_url: Option<Secret>,
  pub db_max_connections: u32,
  pub run_migrations: bool,

  pub storage_mode: StorageMode,
  pub upload_dir: PathBuf,
  pub max_upload_bytes: usize,
  pub cloud: Option<CloudStorageConfig>,

  pub log_format: LogFormat,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_vars(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source.
  pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let env_or = |var_name: &str, default: &str| get_env(var_name).unwrap_or_else(|_| default.to_string());

    let server_host = env_or("SERVER_HOST", "127.0.0.1");
    let server_port = env_or("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let product_store = env_or("PRODUCT_STORE", "postgres")
      .parse::<ProductStoreKind>()
      .map_err(|e| AppError::Config(format!("Invalid PRODUCT_STORE: {}", e)))?;
    let database_url = match product_store {
      ProductStoreKind::Postgres => Some(Secret::new(get_env("DATABASE_URL")?)),
      ProductStoreKind::Memory => get_env("DATABASE_URL").ok().map(Secret::new),
    };
    let db_max_connections = env_or("DB_MAX_CONNECTIONS", "5")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    let run_migrations = env_or("RUN_MIGRATIONS", "true")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;

    let storage_mode = env_or("STORAGE_MODE", "local")
      .parse::<StorageMode>()
      .map_err(|e| AppError::Config(format!("Invalid STORAGE_MODE: {}", e)))?;
    let upload_dir = PathBuf::from(env_or("UPLOAD_DIR", "uploads"));
    let max_upload_bytes = env_or("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?;

    let cloud = match storage_mode {
      StorageMode::Local => None,
      StorageMode::Cloud => {
        let endpoint = get_env("CLOUD_UPLOAD_ENDPOINT")?.trim_end_matches('/').to_string();
        let bucket = get_env("CLOUD_BUCKET")?.trim_matches('/').to_string();
        let public_base_url = get_env("CLOUD_PUBLIC_BASE_URL")
          .map(|url| url.trim_end_matches('/').to_string())
          .unwrap_or_else(|_| format!("{}/{}", endpoint, bucket));
        let timeout_secs = env_or("CLOUD_TIMEOUT_SECS", "30")
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid CLOUD_TIMEOUT_SECS: {}", e)))?;
        Some(CloudStorageConfig {
          endpoint,
          bucket,
          access_token: get_env("CLOUD_ACCESS_TOKEN").ok().map(Secret::new),
          public_base_url,
          timeout_secs,
        })
      }
    };

    let log_format = env_or("LOG_FORMAT", "pretty")
      .parse::<LogFormat>()
      .map_err(|e| AppError::Config(format!("Invalid LOG_FORMAT: {}", e)))?;

    tracing::info!(
      product_store = product_store_label(product_store),
      storage_mode = %storage_mode,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      product_store,
      database_url,
      db_max_connections,
      run_migrations,
      storage_mode,
      upload_dir,
      max_upload_bytes,
      cloud,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn product_store_label(kind: ProductStoreKind) -> &'static str {
  match kind {
    ProductStoreKind::Postgres => "postgres",
    ProductStoreKind::Memory => "memory",
  }
}
