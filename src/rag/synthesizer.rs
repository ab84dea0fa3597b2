//! Answer synthesis grounded on the retrieved records.

use std::sync::Arc;

use super::outcome::{Degradation, Outcome};
use super::prompt::{
    build_grounding_context, build_sales_prompt, GENERIC_FALLBACK_MESSAGE, NO_MATCH_MESSAGE,
};
use crate::catalog::RawRecord;
use crate::core::config::BrandProfile;
use crate::llm::LlmProvider;

pub struct ResponseSynthesizer {
    llm: Arc<dyn LlmProvider>,
    brand: Arc<BrandProfile>,
}

impl ResponseSynthesizer {
    pub fn new(llm: Arc<dyn LlmProvider>, brand: Arc<BrandProfile>) -> Self {
        Self { llm, brand }
    }

    /// `raw_query` is what the user typed, not the expanded search string.
    /// The returned text is never empty.
    pub async fn synthesize(&self, raw_query: &str, records: &[RawRecord]) -> Outcome<String> {
        if records.is_empty() {
            return Outcome::degraded(NO_MATCH_MESSAGE.to_string(), Degradation::NoMatches);
        }

        let context = build_grounding_context(records);
        let prompt = build_sales_prompt(&self.brand, raw_query, &context);

        match self.llm.complete(&prompt).await {
            Ok(text) => {
                let answer = text.trim();
                if answer.is_empty() {
                    tracing::warn!(
                        provider = self.llm.name(),
                        "Synthesis returned empty text; using generic answer"
                    );
                    return Outcome::degraded(
                        GENERIC_FALLBACK_MESSAGE.to_string(),
                        Degradation::EmptySynthesis,
                    );
                }
                Outcome::Fresh(answer.to_string())
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.llm.name(),
                    "Synthesis failed; using generic answer: {}",
                    err
                );
                Outcome::degraded(
                    GENERIC_FALLBACK_MESSAGE.to_string(),
                    Degradation::SynthesisFailed,
                )
            }
        }
    }
}
