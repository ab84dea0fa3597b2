//! End-to-end HTTP tests: the real router served on a local port, with
//! the model and the catalog replaced by in-process stubs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use discovery_backend::catalog::{CatalogStore, RawRecord, SimilaritySearch};
use discovery_backend::core::config::AppConfig;
use discovery_backend::core::errors::ApiError;
use discovery_backend::llm::{EmbeddingMode, LlmProvider};
use discovery_backend::rag::prompt::{GENERIC_FALLBACK_MESSAGE, NO_MATCH_MESSAGE};
use discovery_backend::rag::DiscoveryPipeline;
use discovery_backend::server::router::router;
use discovery_backend::state::AppState;

const SALES_ANSWER: &str = "The Zen Flare Legging is made for your flow.";

#[derive(Clone, Copy, PartialEq)]
enum ModelBehaviour {
    Healthy,
    CompletionDown,
    Panics,
}

struct StubModel {
    behaviour: ModelBehaviour,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmProvider for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.behaviour {
            ModelBehaviour::Panics => panic!("model exploded"),
            ModelBehaviour::CompletionDown => {
                Err(ApiError::Upstream("503 from model".to_string()))
            }
            ModelBehaviour::Healthy if prompt.contains("Return ONLY the expanded search terms") => {
                Ok("high waist flare leggings moisture wicking".to_string())
            }
            ModelBehaviour::Healthy => Ok(SALES_ANSWER.to_string()),
        }
    }

    async fn embed(&self, _text: &str, mode: EmbeddingMode) -> Result<Vec<f32>, ApiError> {
        assert_eq!(mode, EmbeddingMode::Query);
        Ok(vec![0.1, 0.2, 0.3])
    }
}

struct StubCatalog {
    rows: Vec<Value>,
}

#[async_trait]
impl SimilaritySearch for StubCatalog {
    async fn match_products(
        &self,
        _query_embedding: &[f32],
        _threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawRecord>, ApiError> {
        Ok(self
            .rows
            .iter()
            .take(limit)
            .cloned()
            .map(RawRecord::new)
            .collect())
    }
}

#[async_trait]
impl CatalogStore for StubCatalog {
    async fn list_products(&self, limit: usize, offset: usize) -> Result<Vec<RawRecord>, ApiError> {
        Ok(self
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .map(RawRecord::new)
            .collect())
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<RawRecord>, ApiError> {
        Ok(self
            .rows
            .iter()
            .find(|row| row["id"] == product_id)
            .cloned()
            .map(RawRecord::new))
    }
}

fn catalog_rows() -> Vec<Value> {
    vec![
        json!({
            "id": "p-legging",
            "sku_id": "HN-001",
            "title": "Zen Flare Legging",
            "price": 2500,
            "description": "Buttery soft flare legging",
            "category": "Leggings",
            "features": { "attributes": ["4 Way Stretch", "Pockets"] }
        }),
        json!({ "id": "p-broken", "price": 999 }),
        json!({ "id": "p-set", "title": "Soft Co-ord Set", "price": 3200 }),
    ]
}

struct Harness {
    base_url: String,
    model: Arc<StubModel>,
    client: reqwest::Client,
}

async fn serve(behaviour: ModelBehaviour, rows: Vec<Value>) -> Harness {
    let config = AppConfig::default();
    let model = Arc::new(StubModel {
        behaviour,
        prompts: Mutex::new(Vec::new()),
    });
    let catalog = Arc::new(StubCatalog { rows });
    let pipeline = Arc::new(DiscoveryPipeline::new(
        model.clone(),
        catalog.clone(),
        config.retrieval,
        config.brand.clone(),
    ));
    let state = AppState::from_parts(config, catalog, pipeline);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    Harness {
        base_url: format!("http://{}", addr),
        model,
        client: reqwest::Client::new(),
    }
}

impl Harness {
    async fn chat(&self, query: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;
    let (status, body) = harness.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn root_greets_callers() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;
    let (status, body) = harness.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Welcome to Product Discovery Assistant API" })
    );
}

#[tokio::test]
async fn chat_returns_answer_and_only_valid_products() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;
    let (status, body) = harness.chat("  something comfy for yoga  ").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], SALES_ANSWER);

    let products = body["products"].as_array().unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p-legging", "p-set"]);
    assert_eq!(products[0]["sku_id"], "HN-001");
    assert_eq!(products[0]["price"], 2500);
    assert_eq!(products[0]["features"]["attributes"][1], "Pockets");

    // The sales prompt quotes the trimmed query and grounds on the whole batch.
    let prompts = harness.model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("The user asked: \"something comfy for yoga\""));
    assert!(prompts[1].contains("- Untitled product (Price: 999): No description"));
}

#[tokio::test]
async fn chat_with_empty_catalog_explains_there_are_no_matches() {
    let harness = serve(ModelBehaviour::Healthy, Vec::new()).await;
    let (status, body) = harness.chat("a ball gown").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], NO_MATCH_MESSAGE);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn chat_survives_a_model_outage() {
    let harness = serve(ModelBehaviour::CompletionDown, catalog_rows()).await;
    let (status, body) = harness.chat("yoga").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], GENERIC_FALLBACK_MESSAGE);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn chat_panic_becomes_a_generic_server_error() {
    let harness = serve(ModelBehaviour::Panics, catalog_rows()).await;
    let (status, body) = harness.chat("yoga").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn chat_rejects_blank_and_oversized_queries() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;

    let (status, body) = harness.chat(" \n\t ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));

    let (status, _) = harness.chat(&"y".repeat(501)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(harness.model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn product_listing_pages_and_skips_malformed_rows() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;

    let (status, body) = harness.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = harness.get("/products?limit=1&offset=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "p-set");
}

#[tokio::test]
async fn product_listing_validates_page_bounds() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;

    for path in ["/products?limit=0", "/products?limit=101", "/products?offset=-1"] {
        let (status, body) = harness.get(path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn product_lookup_hides_missing_and_malformed_rows() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;

    let (status, body) = harness.get("/products/p-legging").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Zen Flare Legging");

    for id in ["p-unknown", "p-broken"] {
        let (status, body) = harness.get(&format!("/products/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }
}

#[tokio::test]
async fn cors_allows_local_dev_origin() {
    let harness = serve(ModelBehaviour::Healthy, catalog_rows()).await;
    let res = harness
        .client
        .get(format!("{}/health", harness.base_url))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}
