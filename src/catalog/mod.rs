//! Catalog data model and the storage boundary.

pub mod store;
pub mod supabase;
pub mod types;

pub use store::{CatalogStore, SimilaritySearch};
pub use supabase::SupabaseStore;
pub use types::{CatalogItem, RawRecord, RecordError};
