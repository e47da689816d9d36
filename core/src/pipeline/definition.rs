// catalog_core/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its construction.

use super::step::{Handler, RollbackHandler, SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;

/// An ordered list of named steps run against a shared `ContextData<TData>`.
///
/// Every step may carry `before`, `on` and `after` handlers, which run in that
/// order, plus `rollback` handlers which only run when a *later* step fails.
/// `Err` is the error type returned by handlers and by `run`; it must absorb
/// engine-level `PipelineError`s.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) rollback: HashMap<String, Vec<RollbackHandler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` step tuples.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
      rollback: HashMap::new(),
    }
  }

  /// Panics when the step is unknown. Registering a handler against a
  /// misspelled step is a setup bug, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "Pipeline setup error: Step '{}' not found in pipeline definition.",
        step_name
      );
    }
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_rollback(&self, step_name: &str) -> bool {
    self.rollback.get(step_name).map_or(false, |v| !v.is_empty())
  }
}
