pub mod app_config;
pub mod categories;
pub mod config;
pub mod products;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use categories::{
    category_by_slug, category_catalog, classify, CategoryConfig, CategoryGroup, Classified,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{Product, ProductVariant};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
