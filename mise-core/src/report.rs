use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::ingredient::Ingredient;
use crate::menu::MenuItem;
use crate::purchase::Purchase;

/// One recipe line priced at the ingredient's current rate
#[derive(Debug, Clone)]
pub struct CostLine {
    pub ingredient: String,
    pub quantity_required: Decimal,
    pub price_per_unit: Decimal,
}

impl CostLine {
    pub fn cost(&self) -> Decimal {
        self.quantity_required * self.price_per_unit
    }
}

/// A purchase on the report date, resolved with its menu item and the
/// recipe cost lines behind it
#[derive(Debug, Clone)]
pub struct ReportedPurchase {
    pub purchase: Purchase,
    pub menu_item: MenuItem,
    pub cost_lines: Vec<CostLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseSummary {
    pub id: Uuid,
    pub menu_item: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// The daily revenue/cost/profit report
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub inventory_value: Decimal,
    pub revenue: Decimal,
    pub ingredient_cost: Decimal,
    pub profit: Decimal,
    pub purchases: Vec<PurchaseSummary>,
}

/// Aggregates one day of trading.
///
/// Ingredient cost is counted once per purchase transaction, not
/// deduplicated per menu item. Every aggregate is zero when no rows match,
/// and the purchase list comes back newest-first regardless of input order.
pub fn daily_report(
    date: NaiveDate,
    ingredients: &[Ingredient],
    mut purchases: Vec<ReportedPurchase>,
) -> DailyReport {
    purchases.sort_by(|a, b| b.purchase.timestamp.cmp(&a.purchase.timestamp));

    let inventory_value: Decimal = ingredients.iter().map(Ingredient::stock_value).sum();
    let revenue: Decimal = purchases.iter().map(|p| p.menu_item.price).sum();
    let ingredient_cost: Decimal = purchases
        .iter()
        .flat_map(|p| p.cost_lines.iter())
        .map(CostLine::cost)
        .sum();

    let summaries = purchases
        .into_iter()
        .map(|p| PurchaseSummary {
            id: p.purchase.id,
            menu_item: p.menu_item.name,
            price: p.menu_item.price,
            timestamp: p.purchase.timestamp,
        })
        .collect();

    DailyReport {
        date,
        inventory_value,
        revenue,
        ingredient_cost,
        profit: revenue - ingredient_cost,
        purchases: summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn ingredient(name: &str, qty: i64, price_cents: i64) -> Ingredient {
        Ingredient::new(
            name.to_string(),
            Decimal::from(qty),
            "kg".to_string(),
            Decimal::new(price_cents, 2),
        )
    }

    fn reported(item: &MenuItem, cost_lines: Vec<CostLine>) -> ReportedPurchase {
        ReportedPurchase {
            purchase: Purchase::new(item.id),
            menu_item: item.clone(),
            cost_lines,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn test_quiet_day_reports_all_zeros() {
        let report = daily_report(today(), &[], Vec::new());
        assert_eq!(report.inventory_value, Decimal::ZERO);
        assert_eq!(report.revenue, Decimal::ZERO);
        assert_eq!(report.ingredient_cost, Decimal::ZERO);
        assert_eq!(report.profit, Decimal::ZERO);
        assert!(report.purchases.is_empty());
    }

    #[test]
    fn test_inventory_value_sums_all_ingredients() {
        let stock = vec![ingredient("Flour", 10, 150), ingredient("Sugar", 4, 200)];
        let report = daily_report(today(), &stock, Vec::new());
        // 10 * 1.50 + 4 * 2.00
        assert_eq!(report.inventory_value, Decimal::new(2300, 2));
    }

    #[test]
    fn test_no_recipe_item_sells_at_zero_cost() {
        // Soda has no recipe requirements: pure revenue.
        let soda = MenuItem::new("Soda".to_string(), Decimal::new(250, 2), None);
        let report = daily_report(today(), &[], vec![reported(&soda, Vec::new())]);
        assert_eq!(report.revenue, Decimal::new(250, 2));
        assert_eq!(report.ingredient_cost, Decimal::ZERO);
        assert_eq!(report.profit, Decimal::new(250, 2));
        assert_eq!(report.purchases.len(), 1);
        assert_eq!(report.purchases[0].menu_item, "Soda");
    }

    #[test]
    fn test_cost_counted_once_per_transaction() {
        // Two sales of the same burger double the recipe cost, not dedupe it.
        let burger = MenuItem::new("Burger".to_string(), Decimal::new(899, 2), None);
        let lines = || {
            vec![CostLine {
                ingredient: "Patty".to_string(),
                quantity_required: Decimal::from(2),
                price_per_unit: Decimal::new(150, 2),
            }]
        };
        let report = daily_report(
            today(),
            &[],
            vec![reported(&burger, lines()), reported(&burger, lines())],
        );
        assert_eq!(report.revenue, Decimal::new(1798, 2));
        assert_eq!(report.ingredient_cost, Decimal::new(600, 2));
        assert_eq!(report.profit, Decimal::new(1198, 2));
    }

    #[test]
    fn test_purchases_come_back_newest_first() {
        let soda = MenuItem::new("Soda".to_string(), Decimal::new(250, 2), None);
        let mut older = reported(&soda, Vec::new());
        let newer = reported(&soda, Vec::new());
        older.purchase.timestamp = newer.purchase.timestamp - TimeDelta::minutes(5);
        let older_id = older.purchase.id;
        let newer_id = newer.purchase.id;

        let report = daily_report(today(), &[], vec![older, newer]);
        assert_eq!(report.purchases[0].id, newer_id);
        assert_eq!(report.purchases[1].id, older_id);
    }
}
