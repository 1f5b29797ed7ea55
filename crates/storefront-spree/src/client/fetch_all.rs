//! Multi-page taxon fetch loop and the [`TaxonSource`] impl for `SpreeClient`.

use crate::document::Taxon;
use crate::error::SpreeError;
use crate::site_info::TaxonSource;

use super::SpreeClient;
use super::MAX_PAGES;

impl SpreeClient {
    /// Fetches every immediate child of `parent_id`, following
    /// `meta.total_pages` until the last page.
    ///
    /// All-or-nothing: a failure on any page discards the pages already
    /// fetched. A response without `meta` is treated as the only page.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_taxon_page`].
    /// Returns [`SpreeError::PaginationLimit`] if more than [`MAX_PAGES`]
    /// pages are reported.
    pub async fn fetch_all_taxon_children(
        &self,
        parent_id: &str,
    ) -> Result<Vec<Taxon>, SpreeError> {
        let mut taxons: Vec<Taxon> = Vec::new();
        let mut page = 0u32;

        loop {
            page += 1;
            if page > MAX_PAGES {
                return Err(SpreeError::PaginationLimit {
                    resource: format!("taxons with parent {parent_id}"),
                    max_pages: MAX_PAGES,
                });
            }

            let document = self.fetch_taxon_page(parent_id, page).await?;
            let total_pages = document.meta().map_or(1, |meta| meta.total_pages);
            taxons.extend(document.into_primary());

            if page >= total_pages {
                break;
            }
        }

        tracing::debug!(
            parent_id,
            count = taxons.len(),
            pages = page,
            "fetched taxon children"
        );
        Ok(taxons)
    }
}

impl TaxonSource for SpreeClient {
    async fn fetch_taxon_children(&self, parent_id: &str) -> Result<Vec<Taxon>, SpreeError> {
        self.fetch_all_taxon_children(parent_id).await
    }
}
