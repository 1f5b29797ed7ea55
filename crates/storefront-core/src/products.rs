use serde::{Deserialize, Serialize};

/// A product flattened from the commerce backend into the shape the
/// storefront pages render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    pub id: String,
    pub name: String,
    /// HTML description as stored upstream. May be absent.
    pub description: Option<String>,
    /// Never empty when a placeholder image is configured.
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    /// Options used by at least one variant, in first-seen order.
    pub options: Vec<ProductOption>,
    pub price: ProductPrice,
    /// URL slug, e.g. `"spree-tote"`.
    pub slug: String,
    /// Storefront path, e.g. `"/spree-tote"`.
    pub path: String,
    /// SKU of the primary variant.
    pub sku: String,
}

impl NormalizedProduct {
    /// Returns the option with the given display name, if any variant uses it.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Returns the variant with the given id.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    pub value: f64,
    /// ISO 4217 code passed through from upstream without validation.
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Absolute URL.
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    /// Empty unless option expansion is enabled for the product.
    pub options: Vec<ProductOption>,
}

/// One selectable option axis (e.g. "Color") and the values seen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option type id.
    pub id: String,
    pub name: String,
    pub values: Vec<ProductOptionValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    /// Option value id of the first value carrying this label.
    pub id: String,
    pub label: String,
}
