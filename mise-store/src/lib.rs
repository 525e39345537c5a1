pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod error;
pub mod purchase_repo;

pub use catalog_repo::StoreCatalogRepository;
pub use database::DbClient;
pub use error::StoreError;
pub use purchase_repo::StorePurchaseRepository;
