// catalog_core/src/upload/mod.rs

//! Upload staging: the backend seam and the resolver that turns an optional
//! file into an `ImageRef`.

pub mod backend;
pub mod resolver;

pub use backend::ImageBackend;
pub use resolver::UploadResolver;
