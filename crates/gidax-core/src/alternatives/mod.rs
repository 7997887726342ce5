pub mod catalog;
pub mod ranker;

pub use catalog::{CatalogEntry, StaticCatalog};
pub use ranker::{rank, Alternative};
