//! Route definitions for the Retail Back-Office Platform

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stock-in (inventory receiving)
        .nest("/stockin", stock_in_routes())
        // Catalog projections
        .nest("/products", catalog_routes())
        // Operator registry
        .route("/employees", get(handlers::list_employees))
}

/// Stock-in routes
fn stock_in_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_receipts))
        // Static segment before the parameterized detail route
        .route("/items", get(handlers::list_line_items))
        .route("/create-receipt", post(handlers::create_receipt))
        .route("/:id/details", get(handlers::get_receipt_details))
        .route("/items/:id", delete(handlers::delete_line_item))
}

/// Catalog routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        // Static segment before the parameterized product route
        .route("/variants", get(handlers::list_variants))
        .route("/:id", get(handlers::get_product))
}
