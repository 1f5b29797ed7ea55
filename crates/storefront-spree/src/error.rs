use storefront_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpreeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Spree answered with its own `{"error": ...}` envelope.
    #[error("Spree API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("pagination limit reached for {resource}: exceeded {max_pages} pages")]
    PaginationLimit { resource: String, max_pages: u32 },

    #[error("invalid API host \"{api_host}\": {reason}")]
    InvalidApiHost { api_host: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Upstream data that cannot be turned into a storefront product.
///
/// Each of these aborts normalization of the affected product only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("couldn't find primary variant for product with id {product_id}")]
    MissingPrimaryVariant { product_id: String },

    #[error("couldn't find option type having name {name} on product {product_id}")]
    MissingOptionType { product_id: String, name: String },

    #[error(
        "couldn't find option value related to option type with id {option_type_id} on variant {variant_id}"
    )]
    MissingOptionValue {
        option_type_id: String,
        variant_id: String,
    },

    #[error("option value {option_value_id} is not linked to an option type")]
    UnlinkedOptionValue { option_value_id: String },

    #[error("invalid price \"{price}\" for product {product_id}")]
    InvalidPrice { product_id: String, price: String },
}
