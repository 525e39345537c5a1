use std::sync::Arc;

use mise_core::repository::{CatalogRepository, PurchaseRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub auth: AuthConfig,
}
