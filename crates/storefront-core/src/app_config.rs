use crate::config::{BRANDS_TAXONOMY_ID_VAR, CATEGORIES_TAXONOMY_ID_VAR};
use crate::ConfigError;

/// Storefront settings resolved from the environment.
///
/// Optional string settings (`images_option_filter`, `placeholder_image_url`)
/// are `None` when the env var is unset, empty, or the literal `false`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Spree API, e.g. `"https://demo.spreecommerce.org"`.
    pub api_host: String,
    /// Host prepended to relative image URLs. Defaults to `api_host`.
    pub image_host: String,
    pub categories_taxonomy_id: Option<String>,
    pub brands_taxonomy_id: Option<String>,
    /// Expand variant options even when a product has a single variant.
    pub show_single_variant_options: bool,
    /// Option type name (e.g. `"color"`) used to pick one image set per
    /// option value. `None` collects every variant's images.
    pub images_option_filter: Option<String>,
    /// Image substituted when a product resolves no images at all.
    pub placeholder_image_url: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_requests: usize,
}

impl AppConfig {
    /// Returns the categories taxonomy root id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] when the id is not configured.
    pub fn require_categories_taxonomy_id(&self) -> Result<&str, ConfigError> {
        self.categories_taxonomy_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingValue(CATEGORIES_TAXONOMY_ID_VAR.to_string()))
    }

    /// Returns the brands taxonomy root id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] when the id is not configured.
    pub fn require_brands_taxonomy_id(&self) -> Result<&str, ConfigError> {
        self.brands_taxonomy_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingValue(BRANDS_TAXONOMY_ID_VAR.to_string()))
    }
}
