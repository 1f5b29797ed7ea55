pub mod app_config;
pub mod config;
pub mod error;
pub mod products;
pub mod site;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use products::{
    NormalizedProduct, ProductImage, ProductOption, ProductOptionValue, ProductPrice,
    ProductVariant,
};
pub use site::{BrandNode, BrandRecord, CategoryRecord, SiteInfo};
