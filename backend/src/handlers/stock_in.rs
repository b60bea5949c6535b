//! HTTP handlers for stock-in (inventory receiving) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::receiving::{
    CreateReceiptInput, CreatedReceipt, LineItemListing, ReceiptDetail, ReceiptSummary,
    ReceivingService,
};
use crate::AppState;
use shared::ids::split_line_item_id;

/// Response for line item deletion
#[derive(Debug, Serialize)]
pub struct DeleteLineItemResponse {
    pub success: bool,
}

/// List stock-in receipts, newest first
pub async fn list_receipts(State(state): State<AppState>) -> AppResult<Json<Vec<ReceiptSummary>>> {
    let service = ReceivingService::new(state.db);
    let receipts = service.list_receipts().await?;
    Ok(Json(receipts))
}

/// Get the line items of one receipt
pub async fn get_receipt_details(
    State(state): State<AppState>,
    Path(stock_in_id): Path<String>,
) -> AppResult<Json<Vec<ReceiptDetail>>> {
    let service = ReceivingService::new(state.db);
    let details = service.get_receipt_details(&stock_in_id).await?;
    Ok(Json(details))
}

/// Flat listing of all line items across receipts
pub async fn list_line_items(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LineItemListing>>> {
    let service = ReceivingService::new(state.db);
    let items = service.list_line_items().await?;
    Ok(Json(items))
}

/// Create a new receipt or extend an existing one
pub async fn create_receipt(
    State(state): State<AppState>,
    Json(input): Json<CreateReceiptInput>,
) -> AppResult<Json<CreatedReceipt>> {
    let service = ReceivingService::new(state.db);
    let created = service.submit_receipt(input).await?;
    Ok(Json(created))
}

/// Delete one line item, addressed by the composite `receiptId_variantId`
pub async fn delete_line_item(
    State(state): State<AppState>,
    Path(composite_id): Path<String>,
) -> AppResult<Json<DeleteLineItemResponse>> {
    let (stock_in_id, variant_id) = split_line_item_id(&composite_id).ok_or_else(|| {
        AppError::ValidationError(format!(
            "'{composite_id}' is not a valid receiptId_variantId identifier"
        ))
    })?;

    let service = ReceivingService::new(state.db);
    service.delete_line_item(stock_in_id, variant_id).await?;
    Ok(Json(DeleteLineItemResponse { success: true }))
}
