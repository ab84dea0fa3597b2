//! Storage-side capabilities consumed by the backend.
//!
//! The vector-search operator itself lives in the database; this crate
//! only sees a similarity query that returns ranked raw records.

use async_trait::async_trait;

use super::types::RawRecord;
use crate::core::errors::ApiError;

#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Records with similarity >= `threshold`, best first, at most `limit`.
    async fn match_products(
        &self,
        query_embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawRecord>, ApiError>;
}

/// Plain catalog reads used by the product listing endpoints.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_products(&self, limit: usize, offset: usize) -> Result<Vec<RawRecord>, ApiError>;

    async fn get_product(&self, product_id: &str) -> Result<Option<RawRecord>, ApiError>;
}
