use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub const WELCOME_MESSAGE: &str = "Welcome to Product Discovery Assistant API";

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
