// Service exports
pub mod catalog;
pub mod storage;

pub use catalog::{CatalogError, CityCatalog};
pub use storage::{load_or_default, JsonFileStore, MemoryStore, StateStore, StoreError};
