use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::config::ServerConfig;
use crate::server::handlers::{chat, health, products};
use crate::state::AppState;

/// Creates the application router.
///
/// - `GET /`: welcome message
/// - `GET /health`
/// - `POST /chat`: the discovery pipeline
/// - `GET /products`, `GET /products/:product_id`: catalog reads
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state.config.server);
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/chat", post(chat::chat))
        .route("/products", get(products::list_products))
        .route("/products/:product_id", get(products::get_product))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(server: &ServerConfig) -> CorsLayer {
    let allowed_origins = resolve_allowed_origins(server)
        .into_iter()
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}

fn resolve_allowed_origins(server: &ServerConfig) -> Vec<String> {
    let origins = server
        .cors_allowed_origins
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return default_local_origins();
    }

    origins
}

fn default_local_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_list_falls_back_to_local_dev_origins() {
        let server = ServerConfig {
            cors_allowed_origins: vec!["  ".to_string()],
            ..ServerConfig::default()
        };
        assert_eq!(resolve_allowed_origins(&server), default_local_origins());
    }

    #[test]
    fn configured_origins_are_trimmed() {
        let server = ServerConfig {
            cors_allowed_origins: vec![" https://shop.example ".to_string()],
            ..ServerConfig::default()
        };
        assert_eq!(
            resolve_allowed_origins(&server),
            vec!["https://shop.example".to_string()]
        );
    }
}
