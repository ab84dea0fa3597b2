use async_trait::async_trait;

use super::types::EmbeddingMode;
use crate::core::errors::ApiError;

/// Text-completion and text-embedding capability.
///
/// Implementations hold no per-request session and are shared across
/// concurrent requests.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// single-turn completion, no memory between calls
    async fn complete(&self, prompt: &str) -> Result<String, ApiError>;

    /// embed one text for the given side of the retrieval pair
    async fn embed(&self, text: &str, mode: EmbeddingMode) -> Result<Vec<f32>, ApiError>;
}
