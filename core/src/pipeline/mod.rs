// catalog_core/src/pipeline/mod.rs

//! A small staged-pipeline engine: named steps, per-step hooks, compensating
//! rollback on failure, and a type-keyed registry.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::Pipeline;
pub use registry::PipelineRegistry;
pub use step::{Handler, RollbackHandler, SkipCondition, StepDef};
