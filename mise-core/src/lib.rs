pub mod ingredient;
pub mod menu;
pub mod purchase;
pub mod report;
pub mod repository;
pub mod validate;

pub use ingredient::Ingredient;
pub use menu::{MenuItem, RecipeRequirement};
pub use purchase::{check_stock, Purchase, PurchaseError, PurchaseReceipt, ShortageError, StockDemand};
pub use report::{daily_report, DailyReport};
pub use validate::ValidationError;
