use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod ingredients;
pub mod menu;
pub mod middleware;
pub mod purchases;
pub mod reports;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Every screen sits behind staff auth
    Router::new()
        .merge(ingredients::routes())
        .merge(menu::routes())
        .merge(purchases::routes())
        .merge(reports::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::staff_auth_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
