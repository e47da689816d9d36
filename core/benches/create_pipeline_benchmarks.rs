use async_trait::async_trait;
use catalog_core::{
  ContextData, ImageBackend, InMemoryProductStore, Pipeline, PipelineControl, PipelineError, ProductFields,
  ProductService, StorageMode, UploadResolver, UploadedFile,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;

// --- Backend that keeps nothing ---
struct NullBackend;

#[async_trait]
impl ImageBackend for NullBackend {
  fn mode(&self) -> StorageMode {
    StorageMode::Local
  }

  async fn store(&self, file: &UploadedFile) -> anyhow::Result<String> {
    Ok(format!("bench-{}", file.original_name))
  }

  async fn discard(&self, _reference: &str) -> anyhow::Result<()> {
    Ok(())
  }
}

fn service() -> Arc<ProductService> {
  let backend: Arc<dyn ImageBackend> = Arc::new(NullBackend);
  let resolver = UploadResolver::new(StorageMode::Local, backend).unwrap();
  Arc::new(ProductService::new(Arc::new(InMemoryProductStore::new()), Arc::new(resolver)))
}

fn valid_fields() -> ProductFields {
  ProductFields::from_pairs([("name", "Bench Chair"), ("price", "49.99")])
}

fn bench_create_product(c: &mut Criterion) {
  let mut group = c.benchmark_group("CreateProduct");
  let rt = Runtime::new().unwrap();

  for image_bytes in [0usize, 1024, 64 * 1024].iter() {
    let svc = service();
    group.throughput(Throughput::Bytes(*image_bytes as u64));
    group.bench_with_input(BenchmarkId::new("image_bytes", image_bytes), image_bytes, |b, &len| {
      b.to_async(&rt).iter_batched(
        || {
          let file = (len > 0).then(|| UploadedFile::new("chair.png", None, vec![7u8; len]));
          (valid_fields(), file)
        },
        |(fields, file)| {
          let svc = svc.clone();
          async move { svc.create(fields, file).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

// A rejected create walks upload staging, validation and rollback.
fn bench_rejected_create(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let svc = service();

  c.bench_function("CreateProduct/rejected_with_rollback", |b| {
    b.to_async(&rt).iter_batched(
      || {
        let fields = ProductFields::from_pairs([("name", ""), ("price", "abc")]);
        (fields, Some(UploadedFile::new("chair.png", None, vec![1u8; 512])))
      },
      |(fields, file)| {
        let svc = svc.clone();
        async move { svc.create(fields, file).await.unwrap_err() }
      },
      criterion::BatchSize::SmallInput,
    );
  });
}

#[derive(Default)]
struct BenchContext {
  counter: u64,
}

fn bench_engine_overhead(c: &mut Criterion) {
  let mut group = c.benchmark_group("PipelineEngine");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 4, 16].iter() {
    let step_defs: Vec<(&str, bool, Option<catalog_core::pipeline::SkipCondition<BenchContext>>)> = (0..*num_steps)
      .map(|i| (Box::leak(format!("step_{}", i).into_boxed_str()) as &'static str, false, None))
      .collect();

    let mut pipeline = Pipeline::<BenchContext, PipelineError>::new(&step_defs);
    for i in 0..*num_steps {
      pipeline.on_root(&format!("step_{}", i), |ctx: ContextData<BenchContext>| {
        Box::pin(async move {
          ctx.write().counter += 1;
          Ok::<_, PipelineError>(PipelineControl::Continue)
        })
      });
    }
    let pipeline = Arc::new(pipeline);

    group.throughput(Throughput::Elements(*num_steps as u64));
    group.bench_with_input(BenchmarkId::new("steps", num_steps), num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || ContextData::new(BenchContext::default()),
        |ctx| {
          let p = pipeline.clone();
          async move { p.run(ctx).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

criterion_group!(benches, bench_create_product, bench_rejected_create, bench_engine_overhead);
criterion_main!(benches);
