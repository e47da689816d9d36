// tests/registry_tests.rs
mod common;
use catalog_core::{CatalogError, ContextData, Pipeline, PipelineControl, PipelineError, PipelineRegistry, PipelineResult};
use common::*;
use serial_test::serial;

#[derive(Clone, Debug, Default)]
struct UnregisteredContext {
  touched: bool,
}

#[tokio::test]
#[serial]
async fn registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = PipelineRegistry::<TestError>::new();
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("step", false, None)]);
  pipeline.on_root("step", create_simple_handler("step"));
  registry.register_pipeline(pipeline);

  assert!(registry.is_registered::<TestContext>());
  assert!(!registry.is_registered::<UnregisteredContext>());

  let ctx = ContextData::new(TestContext::default());
  let result = registry.run(ctx.clone()).await;

  assert_eq!(result, Ok(PipelineResult::Completed));
  assert_eq!(ctx.read().steps_executed, vec!["step"]);
}

#[tokio::test]
#[serial]
async fn running_unregistered_type_is_a_configuration_error() {
  setup_tracing();
  let registry = PipelineRegistry::<PipelineError>::new();

  let result = registry.run(ContextData::new(UnregisteredContext::default())).await;

  match result {
    Err(PipelineError::ConfigurationError { message, .. }) => {
      assert!(message.contains("UnregisteredContext"), "message was: {}", message)
    }
    other => panic!("Expected ConfigurationError, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn later_registration_replaces_earlier_one() {
  setup_tracing();
  let registry = PipelineRegistry::<TestError>::new();

  let mut first = Pipeline::<TestContext, TestError>::new(&[("old", false, None)]);
  first.on_root("old", create_simple_handler("old"));
  registry.register_pipeline(first);

  let mut second = Pipeline::<TestContext, TestError>::new(&[("new", false, None)]);
  second.on_root("new", create_simple_handler("new"));
  registry.register_pipeline(second);

  let ctx = ContextData::new(TestContext::default());
  registry.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().steps_executed, vec!["new"]);
}

#[tokio::test]
#[serial]
async fn handler_errors_convert_into_registry_error_type() {
  setup_tracing();
  let registry = PipelineRegistry::<CatalogError>::new();
  let mut pipeline = Pipeline::<UnregisteredContext, PipelineError>::new(&[("explode", false, None)]);
  pipeline.on_root("explode", |ctx: ContextData<UnregisteredContext>| {
    Box::pin(async move {
      ctx.write().touched = true;
      Err::<PipelineControl, _>(PipelineError::Internal("handler blew up".to_string()))
    })
  });
  registry.register_pipeline(pipeline);

  let ctx = ContextData::new(UnregisteredContext::default());
  let result = registry.run(ctx.clone()).await;

  assert!(ctx.read().touched);
  match result {
    Err(CatalogError::Pipeline {
      source: PipelineError::Internal(msg),
    }) => assert_eq!(msg, "handler blew up"),
    other => panic!("Expected CatalogError::Pipeline, got {:?}", other),
  }
}
