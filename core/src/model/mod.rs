// catalog_core/src/model/mod.rs

//! Product records, raw client input, and image references.

pub mod image;
pub mod product;

pub use image::{ImageRef, StorageMode, UploadedFile};
pub use product::{NewProduct, Product, ProductChanges, ProductField, ProductFields};
