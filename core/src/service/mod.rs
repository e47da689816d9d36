// catalog_core/src/service/mod.rs

pub mod contexts;
pub mod create_pipeline;
pub mod product_service;
pub mod update_pipeline;

pub use contexts::{CreateProductCtxData, UpdateProductCtxData};
pub use create_pipeline::build_create_pipeline;
pub use product_service::ProductService;
pub use update_pipeline::build_update_pipeline;
