use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::ingredient::Ingredient;
use crate::menu::{MenuItem, RecipeRequirement};
use crate::purchase::{PurchaseError, PurchaseReceipt};
use crate::report::ReportedPurchase;

/// Repository trait for the ingredient/menu/recipe catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_ingredient(
        &self,
        id: Uuid,
    ) -> Result<Option<Ingredient>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_ingredients(
        &self,
    ) -> Result<Vec<Ingredient>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_ingredient(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn create_menu_item(
        &self,
        item: &MenuItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_menu_item(
        &self,
        id: Uuid,
    ) -> Result<Option<MenuItem>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_menu_items(
        &self,
    ) -> Result<Vec<MenuItem>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_menu_item(
        &self,
        item: &MenuItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_menu_item(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn create_requirement(
        &self,
        requirement: &RecipeRequirement,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_requirements(
        &self,
        menu_item_id: Uuid,
    ) -> Result<Vec<RecipeRequirement>, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_requirement(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the purchase processor and its history.
///
/// `attempt_purchase` must run validate-and-deduct as one atomic unit:
/// either every recipe line is deducted and the purchase row exists, or
/// nothing changed at all.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn attempt_purchase(&self, menu_item_id: Uuid) -> Result<PurchaseReceipt, PurchaseError>;

    async fn list_purchases(
        &self,
    ) -> Result<Vec<PurchaseReceipt>, Box<dyn std::error::Error + Send + Sync>>;

    async fn purchases_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ReportedPurchase>, Box<dyn std::error::Error + Send + Sync>>;
}
