use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingredient::MAX_NAME_LEN;
use crate::validate::{ValidationError, Validator};

pub const DEFAULT_IMAGE: &str = "default.jpg";

/// A sellable item on the menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

impl MenuItem {
    pub fn new(name: String, price: Decimal, image: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            image: image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if self.name.trim().is_empty() {
            v.reject("name", "must not be empty");
        } else if self.name.len() > MAX_NAME_LEN {
            v.reject("name", format!("must be at most {} characters", MAX_NAME_LEN));
        }
        if self.price < Decimal::ZERO {
            v.reject("price", "must not be negative");
        } else if self.price.normalize().scale() > 2 {
            v.reject("price", "must have at most 2 decimal places");
        }
        v.finish()
    }
}

/// Links a menu item to one ingredient it consumes.
///
/// A menu item has zero or more requirements; deleting either parent
/// cascades to the requirement rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRequirement {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity_required: Decimal,
}

impl RecipeRequirement {
    pub fn new(menu_item_id: Uuid, ingredient_id: Uuid, quantity_required: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            menu_item_id,
            ingredient_id,
            quantity_required,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if self.quantity_required <= Decimal::ZERO {
            v.reject("quantity_required", "must be greater than zero");
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_defaults() {
        let item = MenuItem::new("Burger".to_string(), Decimal::new(899, 2), None);
        assert_eq!(item.image, DEFAULT_IMAGE);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_quantity_requirement() {
        let req = RecipeRequirement::new(Uuid::new_v4(), Uuid::new_v4(), Decimal::ZERO);
        let err = req.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "quantity_required");
    }

    #[test]
    fn test_rejects_overlong_name() {
        let item = MenuItem::new("x".repeat(31), Decimal::ONE, None);
        assert!(item.validate().is_err());
    }
}
