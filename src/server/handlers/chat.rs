use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub products: Vec<CatalogItem>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let query = validate_query(&payload.query, state.config.app.max_input_length)?;

    let exchange = state
        .pipeline
        .handle(query)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(ChatResponse {
        response: exchange.answer,
        products: exchange.items,
    }))
}

fn validate_query(raw: &str, max_len: usize) -> Result<&str, ApiError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }
    if query.chars().count() > max_len {
        return Err(ApiError::BadRequest(format!(
            "query must be at most {} characters",
            max_len
        )));
    }
    Ok(query)
}
