//! HTTP handlers for catalog projection endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::catalog::{CatalogService, ProductDetail, ProductSummary, VariantListing};
use crate::AppState;

/// List all products with stock aggregates
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductSummary>>> {
    let service = CatalogService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get one product with its variants
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let service = CatalogService::new(state.db);
    let product = service.get_product(&product_id).await?;
    Ok(Json(product))
}

/// List all variants for the stock-in form's picker
pub async fn list_variants(State(state): State<AppState>) -> AppResult<Json<Vec<VariantListing>>> {
    let service = CatalogService::new(state.db);
    let variants = service.list_variants().await?;
    Ok(Json(variants))
}
