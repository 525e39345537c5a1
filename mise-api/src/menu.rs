use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mise_core::{MenuItem, RecipeRequirement};

use crate::error::AppError;
use crate::state::AppState;

/// How many items the front-of-house home screen shows
const FEATURED_COUNT: usize = 8;

#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RequirementForm {
    pub ingredient_id: Uuid,
    pub quantity_required: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub requirements: Vec<RequirementResponse>,
}

#[derive(Debug, Serialize)]
pub struct RequirementResponse {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient: String,
    pub unit: String,
    pub quantity_required: Decimal,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/menu", get(list_menu).post(create_menu_item))
        .route("/v1/menu/featured", get(featured_menu))
        .route("/v1/menu/{id}", put(update_menu_item).delete(delete_menu_item))
        .route(
            "/v1/menu/{id}/requirements",
            get(list_requirements).post(create_requirement),
        )
        .route("/v1/requirements/{id}", delete(delete_requirement))
}

async fn resolve_requirements(
    state: &AppState,
    menu_item_id: Uuid,
) -> Result<Vec<RequirementResponse>, AppError> {
    let requirements = state
        .catalog
        .list_requirements(menu_item_id)
        .await
        .map_err(AppError::storage)?;

    let mut resolved = Vec::with_capacity(requirements.len());
    for req in requirements {
        let ingredient = state
            .catalog
            .get_ingredient(req.ingredient_id)
            .await
            .map_err(AppError::storage)?
            .ok_or_else(|| AppError::NotFound(format!("Ingredient not found: {}", req.ingredient_id)))?;
        resolved.push(RequirementResponse {
            id: req.id,
            ingredient_id: req.ingredient_id,
            ingredient: ingredient.name,
            unit: ingredient.unit,
            quantity_required: req.quantity_required,
        });
    }
    Ok(resolved)
}

/// GET /v1/menu
/// Every menu item with its recipe requirements resolved
async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItemResponse>>, AppError> {
    let items = state
        .catalog
        .list_menu_items()
        .await
        .map_err(AppError::storage)?;

    let mut responses = Vec::with_capacity(items.len());
    for item in items {
        let requirements = resolve_requirements(&state, item.id).await?;
        responses.push(MenuItemResponse {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            requirements,
        });
    }
    Ok(Json(responses))
}

/// GET /v1/menu/featured
/// A random sample of the menu for the home screen
async fn featured_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, AppError> {
    let items = state
        .catalog
        .list_menu_items()
        .await
        .map_err(AppError::storage)?;

    let mut rng = rand::thread_rng();
    let featured: Vec<MenuItem> = items
        .choose_multiple(&mut rng, FEATURED_COUNT)
        .cloned()
        .collect();
    Ok(Json(featured))
}

/// POST /v1/menu
async fn create_menu_item(
    State(state): State<AppState>,
    Json(form): Json<MenuItemForm>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    let item = MenuItem::new(form.name, form.price, form.image);
    item.validate().map_err(AppError::validation)?;

    state
        .catalog
        .create_menu_item(&item)
        .await
        .map_err(AppError::storage)?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /v1/menu/:id
async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<MenuItemForm>,
) -> Result<Json<MenuItem>, AppError> {
    let mut item = state
        .catalog
        .get_menu_item(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::NotFound(format!("Menu item not found: {}", id)))?;

    item.name = form.name;
    item.price = form.price;
    if let Some(image) = form.image {
        item.image = image;
    }
    item.validate().map_err(AppError::validation)?;

    state
        .catalog
        .update_menu_item(&item)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(item))
}

/// DELETE /v1/menu/:id
async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .delete_menu_item(id)
        .await
        .map_err(AppError::storage)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/menu/:id/requirements
async fn list_requirements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RequirementResponse>>, AppError> {
    state
        .catalog
        .get_menu_item(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::NotFound(format!("Menu item not found: {}", id)))?;

    Ok(Json(resolve_requirements(&state, id).await?))
}

/// POST /v1/menu/:id/requirements
async fn create_requirement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<RequirementForm>,
) -> Result<(StatusCode, Json<RecipeRequirement>), AppError> {
    state
        .catalog
        .get_menu_item(id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::NotFound(format!("Menu item not found: {}", id)))?;
    state
        .catalog
        .get_ingredient(form.ingredient_id)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::NotFound(format!("Ingredient not found: {}", form.ingredient_id)))?;

    let requirement = RecipeRequirement::new(id, form.ingredient_id, form.quantity_required);
    requirement.validate().map_err(AppError::validation)?;

    state
        .catalog
        .create_requirement(&requirement)
        .await
        .map_err(AppError::storage)?;

    Ok((StatusCode::CREATED, Json(requirement)))
}

/// DELETE /v1/requirements/:id
async fn delete_requirement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .catalog
        .delete_requirement(id)
        .await
        .map_err(AppError::storage)?;
    Ok(StatusCode::NO_CONTENT)
}
