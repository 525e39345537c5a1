use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use mise_core::Ingredient;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngredientForm {
    pub name: String,
    pub quantity_available: Decimal,
    pub unit: String,
    pub price_per_unit: Decimal,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route(
            "/v1/ingredients/{id}",
            put(update_ingredient).delete(delete_ingredient),
        )
}

/// GET /v1/ingredients
async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = state
        .catalog
        .list_ingredients()
        .await
        .map_err(AppError::storage)?;
    Ok(Json(ingredients))
}

/// POST /v1/ingredients
async fn create_ingredient(
    State(state): State<AppState>,
    Json(form): Json<IngredientForm>,
) -> Result<(StatusCode, Json<Ingredient>), AppError> {
    let ingredient = Ingredient::new(
        form.name,
        form.quantity_available,
        form.unit,
        form.price_per_unit,
    );
    ingredient.validate().map_err(AppError::validation)?;

    state
        .catalog
        .create_ingredient(&ingredient)
        .await
        .map_err(AppError::storage)?;

    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// PUT /v1/ingredients/:id
async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<IngredientForm>,
) -> Result<Json<Ingredient>, AppError> {
    let mut ingredient = state
        .catalog
        .get_ingredient(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::NotFound(format!("Ingredient not found: {}", id)))?;

    ingredient.name = form.name;
    ingredient.quantity_available = form.quantity_available;
    ingredient.unit = form.unit;
    ingredient.price_per_unit = form.price_per_unit;
    ingredient.validate().map_err(AppError::validation)?;

    state
        .catalog
        .update_ingredient(&ingredient)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(ingredient))
}

/// DELETE /v1/ingredients/:id
async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .delete_ingredient(id)
        .await
        .map_err(AppError::storage)?;
    Ok(StatusCode::NO_CONTENT)
}
