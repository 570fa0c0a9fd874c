pub mod catalog;
pub mod filter;
mod ids;
mod manager;
pub mod persistence;
mod storage;
mod viewer;

pub use catalog::GameFields;
pub use filter::CatalogFilter;
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use manager::CatalogManager;
pub use persistence::STORAGE_KEY;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use viewer::Viewer;
