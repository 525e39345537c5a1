use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mise_core::repository::PurchaseRepository;
use mise_core::report::{CostLine, ReportedPurchase};
use mise_core::{check_stock, MenuItem, Purchase, PurchaseError, PurchaseReceipt, StockDemand};

pub struct StorePurchaseRepository {
    pool: PgPool,
}

impl StorePurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage(err: sqlx::Error) -> PurchaseError {
    PurchaseError::Storage(Box::new(err))
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    price: Decimal,
    image: String,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            price: row.price,
            image: row.image,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DemandRow {
    ingredient_id: Uuid,
    name: String,
    quantity_available: Decimal,
    quantity_required: Decimal,
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    menu_item_id: Uuid,
    timestamp: DateTime<Utc>,
    name: String,
    price: Decimal,
    image: String,
}

impl From<PurchaseRow> for PurchaseReceipt {
    fn from(row: PurchaseRow) -> Self {
        PurchaseReceipt {
            purchase: Purchase {
                id: row.id,
                menu_item_id: row.menu_item_id,
                timestamp: row.timestamp,
            },
            menu_item: MenuItem {
                id: row.menu_item_id,
                name: row.name,
                price: row.price,
                image: row.image,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct CostLineRow {
    name: String,
    quantity_required: Decimal,
    price_per_unit: Decimal,
}

#[async_trait]
impl PurchaseRepository for StorePurchaseRepository {
    /// Validate-and-deduct in one transaction. The touched ingredient rows
    /// stay locked from the stock check through the decrement, so two
    /// concurrent purchases cannot both pass validation against the same
    /// stock.
    async fn attempt_purchase(&self, menu_item_id: Uuid) -> Result<PurchaseReceipt, PurchaseError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let item: Option<MenuItemRow> =
            sqlx::query_as("SELECT id, name, price, image FROM menu_items WHERE id = $1")
                .bind(menu_item_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?;
        let item = item.ok_or(PurchaseError::MenuItemNotFound(menu_item_id))?;

        let demands: Vec<DemandRow> = sqlx::query_as(
            r#"
            SELECT i.id AS ingredient_id, i.name, i.quantity_available, r.quantity_required
            FROM recipe_requirements r
            JOIN ingredients i ON i.id = r.ingredient_id
            WHERE r.menu_item_id = $1
            ORDER BY i.name
            FOR UPDATE OF i
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(storage)?;

        // The whole recipe is checked before any row mutates; dropping the
        // transaction on a shortage rolls everything back.
        let checks: Vec<StockDemand> = demands
            .iter()
            .map(|d| StockDemand {
                ingredient: d.name.clone(),
                available: d.quantity_available,
                required: d.quantity_required,
            })
            .collect();
        check_stock(&checks)?;

        for d in &demands {
            sqlx::query(
                r#"
                UPDATE ingredients
                SET quantity_available = quantity_available - $1, updated_at = NOW()
                WHERE id = $2
                "#,
            )
            .bind(d.quantity_required)
            .bind(d.ingredient_id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;
        }

        let purchase = Purchase::new(menu_item_id);
        sqlx::query("INSERT INTO purchases (id, menu_item_id, timestamp) VALUES ($1, $2, $3)")
            .bind(purchase.id)
            .bind(purchase.menu_item_id)
            .bind(purchase.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;

        Ok(PurchaseReceipt {
            purchase,
            menu_item: item.into(),
        })
    }

    async fn list_purchases(
        &self,
    ) -> Result<Vec<PurchaseReceipt>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.menu_item_id, p.timestamp, m.name, m.price, m.image
            FROM purchases p
            JOIN menu_items m ON m.id = p.menu_item_id
            ORDER BY p.timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PurchaseReceipt::from).collect())
    }

    async fn purchases_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ReportedPurchase>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.menu_item_id, p.timestamp, m.name, m.price, m.image
            FROM purchases p
            JOIN menu_items m ON m.id = p.menu_item_id
            WHERE (p.timestamp AT TIME ZONE 'UTC')::date = $1
            ORDER BY p.timestamp DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        // Cost lines are fetched per purchase: the report's cost basis is
        // per transaction, not deduplicated per menu item.
        let mut purchases = Vec::with_capacity(rows.len());
        for row in rows {
            let lines: Vec<CostLineRow> = sqlx::query_as(
                r#"
                SELECT i.name, r.quantity_required, i.price_per_unit
                FROM recipe_requirements r
                JOIN ingredients i ON i.id = r.ingredient_id
                WHERE r.menu_item_id = $1
                ORDER BY i.name
                "#,
            )
            .bind(row.menu_item_id)
            .fetch_all(&self.pool)
            .await?;

            let receipt = PurchaseReceipt::from(row);
            purchases.push(ReportedPurchase {
                purchase: receipt.purchase,
                menu_item: receipt.menu_item,
                cost_lines: lines
                    .into_iter()
                    .map(|l| CostLine {
                        ingredient: l.name,
                        quantity_required: l.quantity_required,
                        price_per_unit: l.price_per_unit,
                    })
                    .collect(),
            });
        }

        Ok(purchases)
    }
}
