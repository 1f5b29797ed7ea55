//! Command handlers: fetch from Spree, normalize, print JSON to stdout.
//!
//! Per-product normalization failures are logged and skipped so one bad
//! product does not hide the rest of a page.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use storefront_core::{AppConfig, NormalizedProduct};
use storefront_spree::{
    get_site_info, normalize_product, CompoundDocument, NormalizeOptions, ProductAttributes,
    SiteInfoOptions, SpreeClient, SpreeError,
};

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print categories and brands.
///
/// # Errors
///
/// Returns an error if either taxonomy root is unconfigured or a taxon
/// fetch fails.
pub(crate) async fn run_site_info(
    client: &SpreeClient,
    config: &AppConfig,
    preview: bool,
) -> anyhow::Result<()> {
    let site = get_site_info(client, config, SiteInfoOptions { preview }).await?;
    print_json(&site)
}

/// Normalizes every primary product in `document`, dropping the ones that fail.
pub(crate) fn normalize_lenient(
    document: &CompoundDocument<ProductAttributes>,
    options: &NormalizeOptions,
) -> Vec<NormalizedProduct> {
    document
        .primary()
        .iter()
        .filter_map(
            |product| match normalize_product(document, product, options) {
                Ok(normalized) => Some(normalized),
                Err(e) => {
                    tracing::warn!(product_id = %product.id, error = %e, "skipping product");
                    None
                }
            },
        )
        .collect()
}

/// Print one page of normalized products.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or parsed. Individual
/// products that fail to normalize are skipped.
pub(crate) async fn run_products(
    client: &SpreeClient,
    config: &AppConfig,
    page: u32,
    per_page: u32,
) -> anyhow::Result<()> {
    let options = NormalizeOptions::from(config);
    let document = client.list_products(page, per_page).await?;
    let products = normalize_lenient(&document, &options);

    if let Some(meta) = document.meta() {
        tracing::info!(
            page,
            total_pages = meta.total_pages,
            total_count = meta.total_count,
            normalized = products.len(),
            "listed products"
        );
    }

    print_json(&products)
}

/// Fetch products by slug with at most `max_concurrent_requests` in flight,
/// then print them in argument order.
///
/// # Errors
///
/// See [`load_products_by_slug`].
pub(crate) async fn run_product(
    client: &SpreeClient,
    config: &AppConfig,
    slugs: &[String],
) -> anyhow::Result<()> {
    let options = NormalizeOptions::from(config);
    let products =
        load_products_by_slug(client, &options, slugs, config.max_concurrent_requests).await?;
    print_json(&products)
}

/// Fetches and normalizes each slug concurrently, returning products in
/// argument order.
///
/// A slug counts as failed when its fetch fails or none of its products
/// normalize.
///
/// # Errors
///
/// Returns an error only when every slug failed. Partial failures are
/// logged and skipped.
pub(crate) async fn load_products_by_slug(
    client: &SpreeClient,
    options: &NormalizeOptions,
    slugs: &[String],
    max_concurrent: usize,
) -> anyhow::Result<Vec<NormalizedProduct>> {
    let mut results: Vec<(
        usize,
        &str,
        Result<CompoundDocument<ProductAttributes>, SpreeError>,
    )> = stream::iter(slugs.iter().enumerate())
        .map(|(index, slug)| async move {
            (index, slug.as_str(), client.get_product(slug).await)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut products = Vec::with_capacity(results.len());
    let mut failed = 0usize;

    for (_, slug, result) in results {
        match result {
            Ok(document) => {
                let normalized = normalize_lenient(&document, options);
                if normalized.is_empty() {
                    failed += 1;
                    tracing::warn!(slug, "no product could be normalized");
                }
                products.extend(normalized);
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(slug, error = %e, "product fetch failed");
            }
        }
    }

    if !slugs.is_empty() && failed == slugs.len() {
        anyhow::bail!("all {failed} requested products failed to load");
    }

    Ok(products)
}
