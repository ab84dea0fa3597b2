//! Request orchestration: expand → retrieve → synthesize.
//!
//! Every stage absorbs its own failures. The only error this module can
//! return is `PipelineError::Unexpected`, raised when a stage panics.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use super::expander::QueryExpander;
use super::outcome::Degradation;
use super::retriever::Retriever;
use super::synthesizer::ResponseSynthesizer;
use crate::catalog::{CatalogItem, RawRecord, SimilaritySearch};
use crate::core::config::{BrandProfile, RetrievalConfig};
use crate::llm::LlmProvider;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the request could not be completed")]
    Unexpected,
}

/// Request-scoped record of one chat turn. Dropped after the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub raw_query: String,
    pub expanded_query: String,
    pub items: Vec<CatalogItem>,
    pub answer: String,
    /// Server-side only.
    pub degradations: Vec<Degradation>,
}

pub struct DiscoveryPipeline {
    expander: QueryExpander,
    retriever: Retriever,
    synthesizer: ResponseSynthesizer,
}

impl DiscoveryPipeline {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SimilaritySearch>,
        retrieval: RetrievalConfig,
        brand: BrandProfile,
    ) -> Self {
        let brand = Arc::new(brand);
        Self {
            expander: QueryExpander::new(llm.clone(), brand.clone()),
            retriever: Retriever::new(llm.clone(), search, retrieval),
            synthesizer: ResponseSynthesizer::new(llm, brand),
        }
    }

    pub async fn handle(&self, raw_query: &str) -> Result<ChatExchange, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat", request_id = %request_id);

        async move {
            match AssertUnwindSafe(self.run(raw_query)).catch_unwind().await {
                Ok(exchange) => {
                    log_completion(&exchange);
                    Ok(exchange)
                }
                Err(payload) => {
                    tracing::error!(
                        query_len = raw_query.chars().count(),
                        "Chat pipeline aborted unexpectedly: {}",
                        panic_message(payload.as_ref())
                    );
                    Err(PipelineError::Unexpected)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, raw_query: &str) -> ChatExchange {
        let mut degradations = Vec::new();

        let expanded_query = self
            .expander
            .expand(raw_query)
            .await
            .record_into(&mut degradations);

        let records = self
            .retriever
            .search(&expanded_query)
            .await
            .record_into(&mut degradations);

        // The model reads every record; clients only get the valid ones.
        let items = surface_items(&records);

        let answer = self
            .synthesizer
            .synthesize(raw_query, &records)
            .await
            .record_into(&mut degradations);

        ChatExchange {
            raw_query: raw_query.to_string(),
            expanded_query,
            items,
            answer,
            degradations,
        }
    }
}

/// Strict projection of a fetched batch; malformed records are dropped.
pub fn surface_items(records: &[RawRecord]) -> Vec<CatalogItem> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.validate() {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(index, "Dropping malformed catalog record: {}", err);
                None
            }
        })
        .collect()
}

fn log_completion(exchange: &ChatExchange) {
    if exchange.degradations.is_empty() {
        tracing::info!(items = exchange.items.len(), "Chat request completed");
        return;
    }

    let labels: Vec<String> = exchange
        .degradations
        .iter()
        .map(|d| format!("{}:{}", d.stage(), d))
        .collect();
    tracing::warn!(
        items = exchange.items.len(),
        "Chat request completed degraded: {}",
        labels.join(", ")
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}
