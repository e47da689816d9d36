// catalog_core/src/pipeline/execution.rs

//! `Pipeline::run()`: executes steps in order and compensates completed steps on failure.

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::definition::Pipeline;
use super::step::{Handler, StepDef};
use crate::error::PipelineError;
use tracing::{event, instrument, span, Instrument, Level};

enum StepOutcome {
  Skipped,
  Continue,
  Stop,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx_data`.
  ///
  /// Steps run strictly one after another; a step's handlers are awaited to
  /// completion before the next step starts. On the first handler error the
  /// rollback handlers of the already-completed steps run (latest first) and
  /// the handler's error is returned unchanged.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut completed_steps: Vec<&str> = Vec::with_capacity(self.steps.len());

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );

      match self.run_step(step_def, ctx_data.clone()).instrument(step_span).await {
        Ok(StepOutcome::Skipped) => {}
        Ok(StepOutcome::Continue) => completed_steps.push(step_def.name.as_str()),
        Ok(StepOutcome::Stop) => {
          event!(Level::INFO, step_name = %step_def.name, "Pipeline stopped by a handler.");
          return Ok(PipelineResult::Stopped);
        }
        Err(e) => {
          event!(Level::WARN, step_name = %step_def.name, error = %e, "Step failed, rolling back completed steps.");
          self.roll_back(&completed_steps, ctx_data.clone()).await;
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: ContextData<TData>) -> Result<StepOutcome, Err> {
    let step_name = step_def.name.as_str();

    if let Some(skip_cond_fn) = &step_def.skip_if {
      if skip_cond_fn(ctx_data.clone()) {
        event!(Level::INFO, "Step skipped due to 'skip_if' condition.");
        return Ok(StepOutcome::Skipped);
      }
    }

    let has_handlers = [&self.before, &self.on, &self.after]
      .iter()
      .any(|phase| phase.get(step_name).map_or(false, |v| !v.is_empty()));

    if !has_handlers {
      if step_def.optional {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(StepOutcome::Skipped);
      }
      event!(Level::ERROR, "Non-optional step has no handlers.");
      return Err(Err::from(PipelineError::HandlerMissing {
        step_name: step_def.name.clone(),
      }));
    }

    for (phase, handlers) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
      if let Some(handlers) = handlers.get(step_name) {
        if let PipelineControl::Stop = Self::run_phase(phase, handlers, &ctx_data).await? {
          return Ok(StepOutcome::Stop);
        }
      }
    }

    event!(Level::DEBUG, "Step processing finished successfully.");
    Ok(StepOutcome::Continue)
  }

  async fn run_phase(
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
  ) -> Result<PipelineControl, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = span!(Level::DEBUG, "step_handler", phase, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return Ok(PipelineControl::Stop),
        Err(e) => {
          event!(Level::ERROR, phase, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PipelineControl::Continue)
  }

  async fn roll_back(&self, completed_steps: &[&str], ctx_data: ContextData<TData>) {
    for step_name in completed_steps.iter().rev() {
      let Some(handlers) = self.rollback.get(*step_name) else {
        continue;
      };
      for handler_fn in handlers {
        match handler_fn(ctx_data.clone()).await {
          Ok(()) => event!(Level::INFO, %step_name, "Step rolled back."),
          Err(e) => event!(Level::ERROR, %step_name, error = %e, "Rollback handler failed; continuing."),
        }
      }
    }
  }
}
