// catalog_app/src/models/mod.rs

//! Database row types.

pub mod product_row;

pub use product_row::ProductRow;
