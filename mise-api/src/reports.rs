use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use mise_core::{daily_report, DailyReport};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Defaults to today (UTC) when omitted
    pub date: Option<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/reports/daily", get(daily))
}

/// GET /v1/reports/daily?date=YYYY-MM-DD
async fn daily(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DailyReport>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let ingredients = state
        .catalog
        .list_ingredients()
        .await
        .map_err(AppError::storage)?;
    let purchases = state
        .purchases
        .purchases_on(date)
        .await
        .map_err(AppError::storage)?;

    Ok(Json(daily_report(date, &ingredients, purchases)))
}
