// catalog_app/src/storage/mod.rs

//! Concrete image backends.

pub mod local_disk;
pub mod object_store;

pub use local_disk::LocalDiskBackend;
pub use object_store::ObjectStoreBackend;
