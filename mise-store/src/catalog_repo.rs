use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mise_core::repository::CatalogRepository;
use mise_core::{Ingredient, MenuItem, RecipeRequirement};

use crate::error::StoreError;

pub struct StoreCatalogRepository {
    pool: PgPool,
}

impl StoreCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: Uuid,
    name: String,
    quantity_available: Decimal,
    unit: String,
    price_per_unit: Decimal,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            name: row.name,
            quantity_available: row.quantity_available,
            unit: row.unit,
            price_per_unit: row.price_per_unit,
        }
    }
}

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
struct RequirementRow {
    id: Uuid,
    menu_item_id: Uuid,
    ingredient_id: Uuid,
    quantity_required: Decimal,
}

impl From<RequirementRow> for RecipeRequirement {
    fn from(row: RequirementRow) -> Self {
        RecipeRequirement {
            id: row.id,
            menu_item_id: row.menu_item_id,
            ingredient_id: row.ingredient_id,
            quantity_required: row.quantity_required,
        }
    }
}

#[async_trait]
impl CatalogRepository for StoreCatalogRepository {
    async fn create_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO ingredients (id, name, quantity_available, unit, price_per_unit)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(ingredient.id)
        .bind(&ingredient.name)
        .bind(ingredient.quantity_available)
        .bind(&ingredient.unit)
        .bind(ingredient.price_per_unit)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::classify(e, "ingredient"))?;

        Ok(())
    }

    async fn get_ingredient(
        &self,
        id: Uuid,
    ) -> Result<Option<Ingredient>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<IngredientRow> = sqlx::query_as(
            "SELECT id, name, quantity_available, unit, price_per_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ingredient::from))
    }

    async fn list_ingredients(
        &self,
    ) -> Result<Vec<Ingredient>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<IngredientRow> = sqlx::query_as(
            "SELECT id, name, quantity_available, unit, price_per_unit FROM ingredients ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    async fn update_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE ingredients
            SET name = $1, quantity_available = $2, unit = $3, price_per_unit = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&ingredient.name)
        .bind(ingredient.quantity_available)
        .bind(&ingredient.unit)
        .bind(ingredient.price_per_unit)
        .bind(ingredient.id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::classify(e, "ingredient"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound.into());
        }
        Ok(())
    }

    async fn delete_ingredient(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Recipe requirements cascade via FK
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound.into());
        }
        Ok(())
    }

    async fn create_menu_item(
        &self,
        item: &MenuItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("INSERT INTO menu_items (id, name, price, image) VALUES ($1, $2, $3, $4)")
            .bind(item.id)
            .bind(&item.name)
            .bind(item.price)
            .bind(&item.image)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "menu item"))?;

        Ok(())
    }

    async fn get_menu_item(
        &self,
        id: Uuid,
    ) -> Result<Option<MenuItem>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<MenuItemRow> =
            sqlx::query_as("SELECT id, name, price, image FROM menu_items WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(MenuItem::from))
    }

    async fn list_menu_items(
        &self,
    ) -> Result<Vec<MenuItem>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<MenuItemRow> =
            sqlx::query_as("SELECT id, name, price, image FROM menu_items ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn update_menu_item(
        &self,
        item: &MenuItem,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = $1, price = $2, image = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.image)
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::classify(e, "menu item"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound.into());
        }
        Ok(())
    }

    async fn delete_menu_item(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Recipe requirements and purchase history cascade via FK
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound.into());
        }
        Ok(())
    }

    async fn create_requirement(
        &self,
        requirement: &RecipeRequirement,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO recipe_requirements (id, menu_item_id, ingredient_id, quantity_required)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(requirement.id)
        .bind(requirement.menu_item_id)
        .bind(requirement.ingredient_id)
        .bind(requirement.quantity_required)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::classify(e, "recipe requirement"))?;

        Ok(())
    }

    async fn list_requirements(
        &self,
        menu_item_id: Uuid,
    ) -> Result<Vec<RecipeRequirement>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<RequirementRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.menu_item_id, r.ingredient_id, r.quantity_required
            FROM recipe_requirements r
            JOIN ingredients i ON i.id = r.ingredient_id
            WHERE r.menu_item_id = $1
            ORDER BY i.name
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RecipeRequirement::from).collect())
    }

    async fn delete_requirement(
        &self,
        id: Uuid,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM recipe_requirements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound.into());
        }
        Ok(())
    }
}
