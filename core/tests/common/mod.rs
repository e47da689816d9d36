// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use async_trait::async_trait;
use catalog_core::{
  CatalogError, CatalogResult, ContextData, ImageBackend, InMemoryProductStore, NewProduct, PipelineControl, PipelineError,
  Product, ProductChanges, ProductFields, ProductService, ProductStore, StorageMode, UploadResolver, UploadedFile,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Engine test context and error ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub rolled_back: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline framework error: {0}")]
  Pipeline(String), // Stored as String for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(pe: PipelineError) -> Self {
    TestError::Pipeline(format!("{:?}", pe))
  }
}

pub fn create_simple_handler(step_name: &'static str) -> catalog_core::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Input builders ---
pub fn fields(pairs: &[(&str, &str)]) -> ProductFields {
  ProductFields::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
}

pub fn png_upload(name: &str) -> UploadedFile {
  UploadedFile::new(name, Some("image/png".to_string()), vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4])
}

// --- Fake image backends ---

/// Records every store and discard call. Local references are plain
/// filenames, cloud references are URLs.
#[derive(Debug)]
pub struct RecordingBackend {
  mode: StorageMode,
  pub stored: Mutex<Vec<String>>,
  pub discarded: Mutex<Vec<String>>,
}

impl RecordingBackend {
  pub fn new(mode: StorageMode) -> Arc<Self> {
    Arc::new(Self {
      mode,
      stored: Mutex::new(Vec::new()),
      discarded: Mutex::new(Vec::new()),
    })
  }

  pub fn stored(&self) -> Vec<String> {
    self.stored.lock().clone()
  }

  pub fn discarded(&self) -> Vec<String> {
    self.discarded.lock().clone()
  }
}

#[async_trait]
impl ImageBackend for RecordingBackend {
  fn mode(&self) -> StorageMode {
    self.mode
  }

  async fn store(&self, file: &UploadedFile) -> anyhow::Result<String> {
    let mut stored = self.stored.lock();
    let name = format!("{}-{}", stored.len() + 1, file.original_name);
    let reference = match self.mode {
      StorageMode::Local => name,
      StorageMode::Cloud => format!("https://cdn.example.test/products/{}", name),
    };
    stored.push(reference.clone());
    Ok(reference)
  }

  async fn discard(&self, reference: &str) -> anyhow::Result<()> {
    self.discarded.lock().push(reference.to_string());
    Ok(())
  }
}

/// Fails every store with a transport-style error.
#[derive(Debug)]
pub struct FailingBackend {
  mode: StorageMode,
  pub attempts: AtomicUsize,
}

impl FailingBackend {
  pub fn new(mode: StorageMode) -> Arc<Self> {
    Arc::new(Self {
      mode,
      attempts: AtomicUsize::new(0),
    })
  }
}

#[async_trait]
impl ImageBackend for FailingBackend {
  fn mode(&self) -> StorageMode {
    self.mode
  }

  async fn store(&self, _file: &UploadedFile) -> anyhow::Result<String> {
    self.attempts.fetch_add(1, Ordering::SeqCst);
    anyhow::bail!("connection reset by peer")
  }

  async fn discard(&self, _reference: &str) -> anyhow::Result<()> {
    anyhow::bail!("nothing to discard")
  }
}

/// Reports success but hands back an empty reference.
#[derive(Debug)]
pub struct EmptyReferenceBackend(pub StorageMode);

#[async_trait]
impl ImageBackend for EmptyReferenceBackend {
  fn mode(&self) -> StorageMode {
    self.0
  }

  async fn store(&self, _file: &UploadedFile) -> anyhow::Result<String> {
    Ok(String::new())
  }

  async fn discard(&self, _reference: &str) -> anyhow::Result<()> {
    Ok(())
  }
}

// --- Store wrappers ---

/// Counts writes reaching the wrapped in-memory store. `fail_writes` makes
/// every write fail the way a lost database connection would.
#[derive(Debug, Default)]
pub struct CountingStore {
  pub inner: InMemoryProductStore,
  pub writes: AtomicUsize,
  pub fail_writes: bool,
}

impl CountingStore {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn failing() -> Arc<Self> {
    Arc::new(Self {
      fail_writes: true,
      ..Self::default()
    })
  }

  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  fn record_write(&self) -> CatalogResult<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes {
      return Err(CatalogError::Persistence("connection to server was lost".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl ProductStore for CountingStore {
  async fn create(&self, record: NewProduct) -> CatalogResult<Product> {
    self.record_write()?;
    self.inner.create(record).await
  }

  async fn find_all(&self) -> CatalogResult<Vec<Product>> {
    self.inner.find_all().await
  }

  async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    self.inner.find_by_id(id).await
  }

  async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<Option<Product>> {
    self.record_write()?;
    self.inner.update(id, changes).await
  }

  async fn delete_by_id(&self, id: Uuid) -> CatalogResult<u64> {
    self.record_write()?;
    self.inner.delete_by_id(id).await
  }
}

pub fn service_with(store: Arc<dyn ProductStore>, backend: Arc<dyn ImageBackend>) -> ProductService {
  let resolver = UploadResolver::new(backend.mode(), backend).expect("backend mode matches");
  ProductService::new(store, Arc::new(resolver))
}
