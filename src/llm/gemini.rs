use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::LlmProvider;
use super::types::EmbeddingMode;
use crate::core::config::LlmConfig;
use crate::core::errors::ApiError;

/// Title attached to document-mode embeddings.
const DOCUMENT_TITLE: &str = "Product Embedding";

#[derive(Clone)]
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    completion_model: String,
    embedding_model: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::internal)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            completion_model: config.completion_model.clone(),
            embedding_model: config.embedding_model.clone(),
            client,
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        let res = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "Gemini request failed ({}): {}",
                status, text
            )));
        }

        res.json().await.map_err(ApiError::upstream)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.completion_model
        );
        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let payload = self.post(&url, &body).await?;
        parse_completion(&payload)
    }

    async fn embed(&self, text: &str, mode: EmbeddingMode) -> Result<Vec<f32>, ApiError> {
        let url = format!(
            "{}/models/{}:embedContent",
            self.base_url, self.embedding_model
        );
        let mut body = json!({
            "model": format!("models/{}", self.embedding_model),
            "content": { "parts": [{ "text": text }] },
            "taskType": mode.task_type(),
        });
        if mode == EmbeddingMode::Document {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("title".to_string(), json!(DOCUMENT_TITLE));
            }
        }

        let payload = self.post(&url, &body).await?;
        parse_embedding(&payload)
    }
}

/// Concatenates the text parts of the first candidate.
pub(crate) fn parse_completion(payload: &Value) -> Result<String, ApiError> {
    let parts = payload["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("Gemini response has no candidate parts".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() && !parts.iter().any(|part| part["text"].is_string()) {
        return Err(ApiError::Upstream(
            "Gemini response has no text parts".to_string(),
        ));
    }

    Ok(text)
}

pub(crate) fn parse_embedding(payload: &Value) -> Result<Vec<f32>, ApiError> {
    let values = payload["embedding"]["values"]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("Gemini response has no embedding".to_string()))?;

    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| ApiError::Upstream("Non-numeric embedding value".to_string()))
        })
        .collect()
}
