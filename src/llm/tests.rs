#[cfg(test)]
mod tests {
    use crate::core::config::LlmConfig;
    use crate::llm::gemini::GeminiProvider;
    use crate::llm::provider::LlmProvider;
    use crate::llm::types::EmbeddingMode;

    fn live_provider() -> Option<GeminiProvider> {
        let api_key = std::env::var("GOOGLE_API_KEY").ok()?;
        let config = LlmConfig {
            api_key,
            ..LlmConfig::default()
        };
        GeminiProvider::new(&config).ok()
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_gemini_completion() {
        let Some(provider) = live_provider() else {
            println!("GOOGLE_API_KEY not set, skipping");
            return;
        };

        match provider.complete("Reply with the single word: leggings").await {
            Ok(text) => println!("Gemini completion: {}", text),
            Err(e) => panic!("Gemini completion failed: {}", e),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_gemini_embeddings_per_mode() {
        let Some(provider) = live_provider() else {
            println!("GOOGLE_API_KEY not set, skipping");
            return;
        };

        let query = provider
            .embed("cozy leggings for yoga", EmbeddingMode::Query)
            .await
            .expect("query embedding");
        let document = provider
            .embed("Zen Flare Legging Buttery Soft Leggings", EmbeddingMode::Document)
            .await
            .expect("document embedding");

        println!("Embedding dimensions: {} / {}", query.len(), document.len());
        assert_eq!(query.len(), document.len());
    }
}
