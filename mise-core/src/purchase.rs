use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::menu::MenuItem;

/// A completed, stock-validated transaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Purchase {
    pub fn new(menu_item_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            menu_item_id,
            timestamp: Utc::now(),
        }
    }
}

/// A committed purchase resolved with the menu item it sold
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    pub menu_item: MenuItem,
}

/// One recipe line resolved against current stock
#[derive(Debug, Clone)]
pub struct StockDemand {
    pub ingredient: String,
    pub available: Decimal,
    pub required: Decimal,
}

/// Insufficient stock; names every short ingredient, not just the first
#[derive(Debug, Clone, thiserror::Error)]
#[error("Not enough stock for: {}", .insufficient.join(", "))]
pub struct ShortageError {
    pub insufficient: Vec<String>,
}

/// Validates an entire recipe against the ledger before anything mutates.
///
/// Stock exactly equal to the requirement is sufficient; an empty recipe
/// always passes. On failure the error carries every insufficient
/// ingredient name in recipe order, and the caller must leave the ledger
/// untouched.
pub fn check_stock(demands: &[StockDemand]) -> Result<(), ShortageError> {
    let insufficient: Vec<String> = demands
        .iter()
        .filter(|d| d.available < d.required)
        .map(|d| d.ingredient.clone())
        .collect();

    if insufficient.is_empty() {
        Ok(())
    } else {
        Err(ShortageError { insufficient })
    }
}

/// Purchase processor errors
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(Uuid),

    #[error(transparent)]
    Shortage(#[from] ShortageError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
