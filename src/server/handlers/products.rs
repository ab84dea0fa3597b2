use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::catalog::CatalogItem;
use crate::core::errors::ApiError;
use crate::rag::surface_items;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default = "default_page_size")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProductsQuery>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let (limit, offset) = validate_page(&params)?;
    let records = state.catalog.list_products(limit, offset).await?;
    Ok(Json(surface_items(&records)))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<Json<CatalogItem>, ApiError> {
    let record = state
        .catalog
        .get_product(&product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    match record.validate() {
        Ok(item) => Ok(Json(item)),
        Err(err) => {
            tracing::warn!("Product {} failed validation: {}", product_id, err);
            Err(ApiError::NotFound("Product not found".to_string()))
        }
    }
}

fn validate_page(params: &ListProductsQuery) -> Result<(usize, usize), ApiError> {
    if !(1..=MAX_PAGE_SIZE).contains(&params.limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    if params.offset < 0 {
        return Err(ApiError::BadRequest("offset must be >= 0".to_string()));
    }
    Ok((params.limit as usize, params.offset as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_are_enforced() {
        let page = |limit, offset| ListProductsQuery { limit, offset };

        assert_eq!(validate_page(&page(20, 0)).unwrap(), (20, 0));
        assert_eq!(validate_page(&page(100, 40)).unwrap(), (100, 40));
        assert!(validate_page(&page(0, 0)).is_err());
        assert!(validate_page(&page(101, 0)).is_err());
        assert!(validate_page(&page(10, -1)).is_err());
    }
}
