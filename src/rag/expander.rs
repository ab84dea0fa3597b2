//! Query expansion: rewrites an informal need into catalog vocabulary.

use std::sync::Arc;

use super::outcome::{Degradation, Outcome};
use super::prompt::build_expansion_prompt;
use crate::core::config::BrandProfile;
use crate::llm::LlmProvider;

pub struct QueryExpander {
    llm: Arc<dyn LlmProvider>,
    brand: Arc<BrandProfile>,
}

impl QueryExpander {
    pub fn new(llm: Arc<dyn LlmProvider>, brand: Arc<BrandProfile>) -> Self {
        Self { llm, brand }
    }

    /// Best effort: any completion failure yields the raw query unchanged.
    pub async fn expand(&self, raw_query: &str) -> Outcome<String> {
        let prompt = build_expansion_prompt(&self.brand, raw_query);

        match self.llm.complete(&prompt).await {
            Ok(text) => {
                let expanded = text.trim();
                if expanded.is_empty() {
                    tracing::warn!(
                        provider = self.llm.name(),
                        "Query expansion returned empty text; using raw query"
                    );
                    return Outcome::degraded(raw_query.to_string(), Degradation::EmptyExpansion);
                }
                tracing::debug!("Expanded query: {}", expanded);
                Outcome::Fresh(expanded.to_string())
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.llm.name(),
                    "Query expansion failed; using raw query: {}",
                    err
                );
                Outcome::degraded(raw_query.to_string(), Degradation::ExpansionFailed)
            }
        }
    }
}
