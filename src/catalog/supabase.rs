use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use super::store::{CatalogStore, SimilaritySearch};
use super::types::RawRecord;
use crate::core::config::CatalogConfig;
use crate::core::errors::ApiError;

/// PostgREST client for a Supabase project.
#[derive(Clone)]
pub struct SupabaseStore {
    rest_url: String,
    api_key: String,
    products_table: String,
    match_function: String,
    client: Client,
}

impl SupabaseStore {
    pub fn new(config: &CatalogConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::internal)?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            api_key: config.supabase_key.clone(),
            products_table: config.products_table.clone(),
            match_function: config.match_function.clone(),
            client,
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_records(&self, builder: RequestBuilder) -> Result<Vec<RawRecord>, ApiError> {
        let res = self
            .authorize(builder)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "Supabase request failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;
        parse_records(payload)
    }
}

#[async_trait]
impl SimilaritySearch for SupabaseStore {
    async fn match_products(
        &self,
        query_embedding: &[f32],
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawRecord>, ApiError> {
        let url = format!("{}/rpc/{}", self.rest_url, self.match_function);
        let body = json!({
            "query_embedding": query_embedding,
            "match_threshold": threshold,
            "match_count": limit,
        });

        self.fetch_records(self.client.post(&url).json(&body)).await
    }
}

#[async_trait]
impl CatalogStore for SupabaseStore {
    async fn list_products(&self, limit: usize, offset: usize) -> Result<Vec<RawRecord>, ApiError> {
        let url = format!("{}/{}", self.rest_url, self.products_table);
        let query = [
            ("select", "*".to_string()),
            ("order", "id.asc".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];

        self.fetch_records(self.client.get(&url).query(&query)).await
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<RawRecord>, ApiError> {
        let url = format!("{}/{}", self.rest_url, self.products_table);
        let query = [
            ("select", "*".to_string()),
            ("id", format!("eq.{}", product_id)),
            ("limit", "1".to_string()),
        ];

        let records = self.fetch_records(self.client.get(&url).query(&query)).await?;
        Ok(records.into_iter().next())
    }
}

/// PostgREST answers row queries and set-returning RPCs with a JSON array.
fn parse_records(payload: Value) -> Result<Vec<RawRecord>, ApiError> {
    match payload {
        Value::Array(rows) => Ok(rows.into_iter().map(RawRecord::new).collect()),
        other => Err(ApiError::Upstream(format!(
            "Expected an array of records, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
