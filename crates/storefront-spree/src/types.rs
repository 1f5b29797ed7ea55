//! Attribute payloads of the Spree Storefront API v2 resources we read.
//!
//! ## Observed shape (Spree 4.x `api/v2/storefront`)
//!
//! ### Prices
//! `price` is a decimal **string** (`"15.99"`), with `currency` alongside as an
//! ISO code. `display_price` is a formatted string we ignore.
//!
//! ### Image styles
//! `styles` is an array of `{url, width, height}` where `width`/`height` are
//! sent as strings (`"240"`) by older stores and as numbers by newer ones.
//! Both are accepted. `original_url` is absent on stores older than 4.2.
//!
//! ### Taxon intervals
//! `left`/`right` are the nested-set bounds (`lft`/`rgt` columns upstream).
//! Always present on taxon payloads.

use serde::{Deserialize, Deserializer};

/// A `product` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductAttributes {
    pub name: String,
    /// HTML description. `null` on products created without one.
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    /// Decimal string, e.g. `"15.99"`.
    pub price: String,
    pub currency: String,
    #[serde(default)]
    pub available_on: Option<String>,
    #[serde(default)]
    pub purchasable: Option<bool>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// A `variant` resource. The master variant has `is_master: true`.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantAttributes {
    /// May be an empty string when the store does not track SKUs.
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub is_master: bool,
    /// Human summary such as `"Color: Red, Size: M"`.
    #[serde(default)]
    pub options_text: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// An `option_type` resource such as "color" / "Color".
#[derive(Debug, Clone, Deserialize)]
pub struct OptionTypeAttributes {
    /// Internal name, matched against the image filter setting.
    pub name: String,
    /// Shopper-facing label.
    pub presentation: String,
    #[serde(default)]
    pub position: Option<i32>,
}

/// An `option_value` resource such as "red" / "Red".
#[derive(Debug, Clone, Deserialize)]
pub struct OptionValueAttributes {
    pub name: String,
    pub presentation: String,
    #[serde(default)]
    pub position: Option<i32>,
}

/// An `image` resource attached to a variant.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAttributes {
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub styles: Vec<ImageStyle>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageStyle {
    pub url: String,
    #[serde(default, deserialize_with = "dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "dimension")]
    pub height: Option<u32>,
}

/// A `taxon` resource: one node of a nested-set taxonomy tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonAttributes {
    pub name: String,
    pub left: i64,
    pub right: i64,
    #[serde(default)]
    pub pretty_name: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub depth: Option<i32>,
}

/// Accepts `"240"`, `240`, or `null`.
fn dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => Ok(s.trim().parse().ok()),
    }
}
