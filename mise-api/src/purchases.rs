use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mise_core::PurchaseReceipt;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PurchaseForm {
    pub menu_item_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub menu_item: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<PurchaseReceipt> for PurchaseResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        Self {
            id: receipt.purchase.id,
            menu_item_id: receipt.menu_item.id,
            menu_item: receipt.menu_item.name,
            price: receipt.menu_item.price,
            timestamp: receipt.purchase.timestamp,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/purchases", get(list_purchases).post(create_purchase))
}

/// GET /v1/purchases
/// Full purchase history, newest first
async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<PurchaseResponse>>, AppError> {
    let receipts = state
        .purchases
        .list_purchases()
        .await
        .map_err(AppError::storage)?;
    Ok(Json(receipts.into_iter().map(PurchaseResponse::from).collect()))
}

/// POST /v1/purchases
/// The stock-validated purchase flow: either every recipe line is deducted
/// and a purchase row exists, or a 409 names every short ingredient and
/// nothing changed.
async fn create_purchase(
    State(state): State<AppState>,
    Json(form): Json<PurchaseForm>,
) -> Result<(StatusCode, Json<PurchaseResponse>), AppError> {
    let receipt = state
        .purchases
        .attempt_purchase(form.menu_item_id)
        .await
        .map_err(AppError::purchase)?;

    tracing::info!(
        menu_item = %receipt.menu_item.name,
        purchase_id = %receipt.purchase.id,
        "purchase committed"
    );

    Ok((StatusCode::CREATED, Json(receipt.into())))
}
