use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{ValidationError, Validator};

/// Longest name the management forms accept, for ingredients and menu items alike
pub const MAX_NAME_LEN: usize = 30;

/// One row of the stock ledger.
///
/// `quantity_available` never goes below zero after a committed transaction;
/// the purchase processor validates the whole recipe before deducting anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub quantity_available: Decimal,
    pub unit: String,
    pub price_per_unit: Decimal,
}

impl Ingredient {
    pub fn new(
        name: String,
        quantity_available: Decimal,
        unit: String,
        price_per_unit: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            quantity_available,
            unit,
            price_per_unit,
        }
    }

    /// Field-level checks for the create/update forms
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if self.name.trim().is_empty() {
            v.reject("name", "must not be empty");
        } else if self.name.len() > MAX_NAME_LEN {
            v.reject("name", format!("must be at most {} characters", MAX_NAME_LEN));
        }
        if self.quantity_available < Decimal::ZERO {
            v.reject("quantity_available", "must not be negative");
        }
        if self.unit.trim().is_empty() {
            v.reject("unit", "must not be empty");
        } else if self.unit.len() > MAX_NAME_LEN {
            v.reject("unit", format!("must be at most {} characters", MAX_NAME_LEN));
        }
        if self.price_per_unit < Decimal::ZERO {
            v.reject("price_per_unit", "must not be negative");
        } else if self.price_per_unit.normalize().scale() > 2 {
            v.reject("price_per_unit", "must have at most 2 decimal places");
        }
        v.finish()
    }

    /// Current valuation of the stock on hand
    pub fn stock_value(&self) -> Decimal {
        self.quantity_available * self.price_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flour() -> Ingredient {
        Ingredient::new(
            "Flour".to_string(),
            Decimal::new(5000, 3),
            "kg".to_string(),
            Decimal::new(120, 2),
        )
    }

    #[test]
    fn test_valid_ingredient_passes() {
        assert!(flour().validate().is_ok());
    }

    #[test]
    fn test_rejects_every_bad_field() {
        let mut bad = flour();
        bad.name = "".to_string();
        bad.quantity_available = Decimal::new(-1, 0);
        bad.price_per_unit = Decimal::new(12345, 4); // 1.2345
        let err = bad.validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "quantity_available", "price_per_unit"]);
    }

    #[test]
    fn test_trailing_zeros_do_not_break_price_scale() {
        let mut ok = flour();
        ok.price_per_unit = Decimal::new(25000, 4); // 2.5000
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_stock_value() {
        // 5 kg at 1.20 per kg
        assert_eq!(flour().stock_value(), Decimal::new(600, 2));
    }
}
