//! Retrieval: query embedding + similarity search over the catalog.

use std::sync::Arc;

use super::outcome::{Degradation, Outcome};
use crate::catalog::{RawRecord, SimilaritySearch};
use crate::core::config::RetrievalConfig;
use crate::llm::{EmbeddingMode, LlmProvider};

pub struct Retriever {
    embedder: Arc<dyn LlmProvider>,
    search: Arc<dyn SimilaritySearch>,
    defaults: RetrievalConfig,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn LlmProvider>,
        search: Arc<dyn SimilaritySearch>,
        defaults: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            search,
            defaults,
        }
    }

    /// Searches with the configured threshold and result cap.
    pub async fn search(&self, expanded_query: &str) -> Outcome<Vec<RawRecord>> {
        self.search_with(
            expanded_query,
            self.defaults.match_threshold,
            self.defaults.match_count,
        )
        .await
    }

    /// Never fails. Records come back in the service's similarity order.
    pub async fn search_with(
        &self,
        expanded_query: &str,
        threshold: f32,
        limit: usize,
    ) -> Outcome<Vec<RawRecord>> {
        if limit == 0 {
            return Outcome::Fresh(Vec::new());
        }
        let threshold = threshold.clamp(0.0, 1.0);

        let embedding = match self.embedder.embed(expanded_query, EmbeddingMode::Query).await {
            Ok(vector) if vector.is_empty() => {
                tracing::warn!("Query embedding came back empty; skipping search");
                return Outcome::degraded(Vec::new(), Degradation::EmptyEmbedding);
            }
            Ok(vector) => vector,
            Err(err) => {
                tracing::warn!("Query embedding failed; skipping search: {}", err);
                return Outcome::degraded(Vec::new(), Degradation::EmbeddingFailed);
            }
        };

        match self.search.match_products(&embedding, threshold, limit).await {
            Ok(records) => {
                if records.is_empty() {
                    tracing::info!(threshold, limit, "No catalog matches above threshold");
                } else {
                    tracing::debug!(count = records.len(), "Similarity search returned records");
                }
                Outcome::Fresh(records)
            }
            Err(err) => {
                tracing::warn!("Similarity search unavailable: {}", err);
                Outcome::degraded(Vec::new(), Degradation::SearchFailed)
            }
        }
    }
}
