// catalog_core/src/lib.rs

//! Product catalog core: the staged pipeline engine and the product
//! operations built on it.
//!
//! A create request runs as a pipeline of named steps:
//!  - `stage_image_upload`: write the optional image through the configured backend.
//!  - `validate_product_fields`: check the raw fields against a `RuleSet`.
//!  - `transform_product_record`: normalize into a `NewProduct`.
//!  - `persist_product`: hand the record to the `ProductStore`.
//!
//! A failure after the upload step rolls the staged image back.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod service;
pub mod store;
pub mod transform;
pub mod upload;
pub mod validation;

pub use crate::error::{CatalogError, CatalogResult, PipelineError, PipelineOutcome};
pub use crate::model::{ImageRef, NewProduct, Product, ProductChanges, ProductField, ProductFields, StorageMode, UploadedFile};
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineRegistry, PipelineResult, StepDef};
pub use crate::service::ProductService;
pub use crate::store::{InMemoryProductStore, ProductStore};
pub use crate::transform::ProductTransformer;
pub use crate::upload::{ImageBackend, UploadResolver};
pub use crate::validation::{FieldError, FieldValidator, RuleSet};
