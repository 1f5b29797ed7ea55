//! HTTP client for the Spree Storefront API v2.

mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::AppConfig;

use crate::document::CompoundDocument;
use crate::error::SpreeError;
use crate::types::{ProductAttributes, TaxonAttributes};

/// Maximum number of taxon pages to follow before returning an error.
/// Guards against a `meta.total_pages` that never converges.
pub(super) const MAX_PAGES: u32 = 50;

/// Page size for taxon listings. Spree caps `per_page` at 100 by default.
pub const TAXONS_PER_PAGE: u32 = 100;

/// Relationships the product normalizer walks; requested in one round trip.
pub const PRODUCT_INCLUDES: &str = "primary_variant,primary_variant.images,variants,\
variants.images,variants.option_values,variants.option_values.option_type,\
option_types,option_types.option_values";

const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Client for the Spree Storefront API.
///
/// Non-2xx responses become typed errors. Nothing is retried: transport
/// failures surface to the caller as-is.
pub struct SpreeClient {
    client: Client,
    base_url: Url,
}

/// `{"error": "..."}` body Spree sends with 4xx/5xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl SpreeClient {
    /// Creates a client for the Spree instance at `api_host`.
    ///
    /// # Errors
    ///
    /// - [`SpreeError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`SpreeError::InvalidApiHost`] if `api_host` is not an absolute
    ///   base URL.
    pub fn new(api_host: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SpreeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash keeps any path prefix (e.g. `/shop`) intact when
        // endpoint segments are appended.
        let normalised = format!("{}/", api_host.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SpreeError::InvalidApiHost {
            api_host: api_host.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SpreeError::InvalidApiHost {
                api_host: api_host.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Creates a client from the API host, timeout, and user agent in `config`.
    ///
    /// # Errors
    ///
    /// See [`SpreeClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SpreeError> {
        Self::new(
            &config.api_host,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one page of the immediate children of `parent_id`.
    ///
    /// # Errors
    ///
    /// See [`Self::get_document`].
    pub async fn fetch_taxon_page(
        &self,
        parent_id: &str,
        page: u32,
    ) -> Result<CompoundDocument<TaxonAttributes>, SpreeError> {
        let url = self.endpoint(
            &["taxons"],
            &[
                ("filter[parent_id]", parent_id),
                ("page", &page.to_string()),
                ("per_page", &TAXONS_PER_PAGE.to_string()),
            ],
        );
        self.get_document(url, "taxons page").await
    }

    /// Fetches one page of products with every relationship the normalizer needs.
    ///
    /// # Errors
    ///
    /// See [`Self::get_document`].
    pub async fn list_products(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<CompoundDocument<ProductAttributes>, SpreeError> {
        let url = self.endpoint(
            &["products"],
            &[
                ("include", PRODUCT_INCLUDES),
                ("page", &page.to_string()),
                ("per_page", &per_page.to_string()),
            ],
        );
        self.get_document(url, "products page").await
    }

    /// Fetches a single product by slug (or id) with its related resources.
    ///
    /// # Errors
    ///
    /// See [`Self::get_document`]; an unknown slug yields [`SpreeError::NotFound`].
    pub async fn get_product(
        &self,
        slug: &str,
    ) -> Result<CompoundDocument<ProductAttributes>, SpreeError> {
        let url = self.endpoint(&["products", slug], &[("include", PRODUCT_INCLUDES)]);
        self.get_document(url, "product").await
    }

    /// GETs `url` and parses the body as a compound document.
    ///
    /// # Errors
    ///
    /// - [`SpreeError::NotFound`]: HTTP 404.
    /// - [`SpreeError::Api`]: any other non-2xx status with a Spree error body.
    /// - [`SpreeError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`SpreeError::Http`]: network or TLS failure.
    /// - [`SpreeError::Deserialize`]: body is not the expected document shape.
    async fn get_document<T: DeserializeOwned>(
        &self,
        url: String,
        context: &str,
    ) -> Result<CompoundDocument<T>, SpreeError> {
        tracing::debug!(%url, "requesting spree document");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, JSON_API_MEDIA_TYPE)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SpreeError::NotFound { url });
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(error_body) => SpreeError::Api {
                    status: status.as_u16(),
                    message: error_body.error,
                },
                Err(_) => SpreeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                },
            });
        }

        serde_json::from_str::<CompoundDocument<T>>(&body).map_err(|e| SpreeError::Deserialize {
            context: format!("{context} from {url}"),
            source: e,
        })
    }

    /// Builds `<api_host>/api/v2/storefront/<segments>?<query>`.
    ///
    /// Segments are percent-encoded, so slugs cannot escape the path.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["api", "v2", "storefront"])
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.to_string()
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
