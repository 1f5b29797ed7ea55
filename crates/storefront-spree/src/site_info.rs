//! Category and brand navigation built from two taxonomy roots.

use std::future::Future;

use storefront_core::{AppConfig, BrandRecord, CategoryRecord, SiteInfo};

use crate::document::Taxon;
use crate::error::SpreeError;
use crate::taxonomy::sort_taxons;

/// Anything that can list the immediate children of a taxon.
///
/// Implemented by [`crate::SpreeClient`]; tests substitute in-memory sources.
pub trait TaxonSource {
    fn fetch_taxon_children(
        &self,
        parent_id: &str,
    ) -> impl Future<Output = Result<Vec<Taxon>, SpreeError>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SiteInfoOptions {
    /// Accepted for parity with other storefront loaders; Spree has no
    /// preview mode for taxons.
    pub preview: bool,
}

/// Loads categories and brands from the configured taxonomy roots.
///
/// Both root ids are checked before any request is made. Children of each
/// root are ordered by their nested-set intervals.
///
/// # Errors
///
/// - [`SpreeError::Config`] when either taxonomy root id is not configured.
/// - Any error from [`TaxonSource::fetch_taxon_children`], unchanged.
#[tracing::instrument(skip_all, fields(preview = options.preview))]
pub async fn get_site_info<S: TaxonSource + Sync>(
    source: &S,
    config: &AppConfig,
    options: SiteInfoOptions,
) -> Result<SiteInfo, SpreeError> {
    let categories_root = config.require_categories_taxonomy_id()?;
    let brands_root = config.require_brands_taxonomy_id()?;

    let (mut categories, mut brands) = tokio::try_join!(
        source.fetch_taxon_children(categories_root),
        source.fetch_taxon_children(brands_root),
    )?;

    sort_taxons(&mut categories);
    sort_taxons(&mut brands);

    tracing::debug!(
        categories = categories.len(),
        brands = brands.len(),
        "loaded site taxonomies"
    );

    Ok(SiteInfo {
        categories: categories
            .iter()
            .map(|t| CategoryRecord::from_taxon(&t.id, &t.attributes.name))
            .collect(),
        brands: brands
            .iter()
            .map(|t| BrandRecord::from_taxon(&t.id, &t.attributes.name))
            .collect(),
    })
}

#[cfg(test)]
#[path = "site_info_test.rs"]
mod tests;
