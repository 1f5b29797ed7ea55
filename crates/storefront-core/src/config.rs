use crate::app_config::AppConfig;
use crate::ConfigError;

pub const API_HOST_VAR: &str = "SPREE_API_HOST";
pub const IMAGE_HOST_VAR: &str = "SPREE_IMAGE_HOST";
pub const CATEGORIES_TAXONOMY_ID_VAR: &str = "SPREE_CATEGORIES_TAXONOMY_ID";
pub const BRANDS_TAXONOMY_ID_VAR: &str = "SPREE_BRANDS_TAXONOMY_ID";
pub const SHOW_SINGLE_VARIANT_OPTIONS_VAR: &str = "SPREE_SHOW_SINGLE_VARIANT_OPTIONS";
pub const IMAGES_OPTION_FILTER_VAR: &str = "SPREE_IMAGES_OPTION_FILTER";
pub const PLACEHOLDER_IMAGE_URL_VAR: &str = "SPREE_PRODUCT_PLACEHOLDER_IMAGE_URL";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingValue(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Unset, empty, and the literal "false" all switch the setting off.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "false")
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{raw}\""),
            }),
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidValue {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_host = require(API_HOST_VAR)?;
    let image_host = optional(IMAGE_HOST_VAR).unwrap_or_else(|| api_host.clone());

    let categories_taxonomy_id = optional(CATEGORIES_TAXONOMY_ID_VAR);
    let brands_taxonomy_id = optional(BRANDS_TAXONOMY_ID_VAR);

    let show_single_variant_options = parse_bool(SHOW_SINGLE_VARIANT_OPTIONS_VAR, false)?;
    let images_option_filter = optional(IMAGES_OPTION_FILTER_VAR);
    let placeholder_image_url = optional(PLACEHOLDER_IMAGE_URL_VAR);

    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1");
    let max_concurrent_requests = parse_usize("STOREFRONT_MAX_CONCURRENT_REQUESTS", "4")?;

    Ok(AppConfig {
        api_host,
        image_host,
        categories_taxonomy_id,
        brands_taxonomy_id,
        show_single_variant_options,
        images_option_filter,
        placeholder_image_url,
        log_level,
        request_timeout_secs,
        user_agent,
        max_concurrent_requests,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
