//! Normalization from Spree compound documents to
//! [`storefront_core::NormalizedProduct`].
//!
//! Option folding lives in [`crate::options`] and URL handling in
//! [`crate::images`]; this module walks the relationship graph and applies
//! the storefront policies (option visibility, image strategy, placeholder).

use std::collections::HashSet;

use storefront_core::{
    AppConfig, NormalizedProduct, ProductImage, ProductOption, ProductPrice, ProductVariant,
};

use crate::document::{
    images, option_type, option_types, option_values, primary_variant, variants, CompoundDocument,
    Image, Product, RelationshipResolver, Variant, OPTION_VALUES, VARIANTS,
};
use crate::error::NormalizeError;
use crate::images::media_gallery;
use crate::options::expand_options;
use crate::types::ProductAttributes;

/// How variant images are selected in addition to the primary variant's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStrategy {
    /// Every variant's images, in variant order, duplicates included.
    Unfiltered,
    /// One image set per distinct value of the named option type
    /// (e.g. `"color"`); the first variant carrying a value wins.
    ByOptionType(String),
}

/// Storefront policies applied while normalizing products.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub show_single_variant_options: bool,
    pub image_strategy: ImageStrategy,
    pub placeholder_image_url: Option<String>,
    pub image_host: String,
}

impl From<&AppConfig> for NormalizeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            show_single_variant_options: config.show_single_variant_options,
            image_strategy: config
                .images_option_filter
                .clone()
                .map_or(ImageStrategy::Unfiltered, ImageStrategy::ByOptionType),
            placeholder_image_url: config.placeholder_image_url.clone(),
            image_host: config.image_host.clone(),
        }
    }
}

/// Storefront path for a product page.
#[must_use]
pub fn product_path(product: &Product) -> String {
    format!("/{}", product.attributes.slug)
}

/// Normalizes one product resource using the related resources in `resolver`.
///
/// # Errors
///
/// - [`NormalizeError::MissingPrimaryVariant`] if the product has no
///   resolvable `primary_variant`.
/// - [`NormalizeError::InvalidPrice`] if the price string is not a finite number.
/// - [`NormalizeError::UnlinkedOptionValue`] if an expanded option value has
///   no option type.
/// - [`NormalizeError::MissingOptionType`] / [`NormalizeError::MissingOptionValue`]
///   when filtering images by an option type the product data does not carry.
#[tracing::instrument(level = "debug", skip_all, fields(product_id = %product.id))]
pub fn normalize_product<R: RelationshipResolver>(
    resolver: &R,
    product: &Product,
    options: &NormalizeOptions,
) -> Result<NormalizedProduct, NormalizeError> {
    let primary = primary_variant(resolver, product).ok_or_else(|| {
        NormalizeError::MissingPrimaryVariant {
            product_id: product.id.clone(),
        }
    })?;

    let price = parse_price(product)?;

    // Counted from identifiers, not resolved resources: the decision should
    // not depend on which variants the response happened to include.
    let has_non_master_variants = product.related(VARIANTS).len() > 1;
    let show_options = options.show_single_variant_options || has_non_master_variants;

    let variant_records = variants(resolver, product);

    let mut product_options: Vec<ProductOption> = Vec::new();
    let mut normalized_variants = Vec::with_capacity(variant_records.len());

    for variant in &variant_records {
        let mut variant_options: Vec<ProductOption> = Vec::new();

        if show_options {
            for option_value in option_values(resolver, variant) {
                variant_options = expand_options(resolver, option_value, variant_options)?;
                product_options = expand_options(resolver, option_value, product_options)?;
            }
        }

        normalized_variants.push(ProductVariant {
            id: variant.id.clone(),
            options: variant_options,
        });
    }

    let variant_images = match &options.image_strategy {
        ImageStrategy::Unfiltered => variant_records
            .iter()
            .flat_map(|variant| images(resolver, variant))
            .collect(),
        ImageStrategy::ByOptionType(name) => {
            images_by_option_type(resolver, product, &variant_records, name)?
        }
    };

    let mut image_records = images(resolver, primary);
    image_records.extend(variant_images);

    let mut gallery = media_gallery(&options.image_host, &image_records);
    if gallery.is_empty() {
        if let Some(url) = &options.placeholder_image_url {
            gallery.push(ProductImage {
                url: url.clone(),
                alt: String::new(),
            });
        }
    }

    tracing::debug!(
        variants = normalized_variants.len(),
        options = product_options.len(),
        images = gallery.len(),
        "normalized product"
    );

    Ok(NormalizedProduct {
        id: product.id.clone(),
        name: product.attributes.name.clone(),
        description: product.attributes.description.clone(),
        images: gallery,
        variants: normalized_variants,
        options: product_options,
        price,
        slug: product.attributes.slug.clone(),
        path: product_path(product),
        sku: primary.attributes.sku.clone(),
    })
}

/// Normalizes every primary product of a list response.
///
/// # Errors
///
/// Returns the first [`NormalizeError`] encountered; no partial list is
/// produced.
pub fn normalize_products(
    document: &CompoundDocument<ProductAttributes>,
    options: &NormalizeOptions,
) -> Result<Vec<NormalizedProduct>, NormalizeError> {
    document
        .primary()
        .iter()
        .map(|product| normalize_product(document, product, options))
        .collect()
}

fn parse_price(product: &Product) -> Result<ProductPrice, NormalizeError> {
    let raw = &product.attributes.price;
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| NormalizeError::InvalidPrice {
            product_id: product.id.clone(),
            price: raw.clone(),
        })?;

    Ok(ProductPrice {
        value,
        currency_code: product.attributes.currency.clone(),
    })
}

/// Collects one image set per distinct value of the option type `name`.
fn images_by_option_type<'a, R: RelationshipResolver>(
    resolver: &'a R,
    product: &Product,
    variant_records: &[&Variant],
    name: &str,
) -> Result<Vec<&'a Image>, NormalizeError> {
    let filter_type = option_types(resolver, product)
        .into_iter()
        .find(|t| t.attributes.name == name)
        .ok_or_else(|| NormalizeError::MissingOptionType {
            product_id: product.id.clone(),
            name: name.to_owned(),
        })?;

    let filter_value_ids: HashSet<&str> = filter_type
        .related(OPTION_VALUES)
        .iter()
        .map(|id| id.id.as_str())
        .collect();

    let mut included_value_ids: HashSet<&str> = HashSet::new();
    let mut collected = Vec::new();

    for variant in variant_records {
        // Option types served without an `option_values` list are matched
        // through each value's own `option_type` link instead.
        let axis_value_id = variant
            .related(OPTION_VALUES)
            .iter()
            .find(|value_id| {
                filter_value_ids.contains(value_id.id.as_str())
                    || resolver
                        .resolve(value_id)
                        .and_then(|value| option_type(resolver, value))
                        .is_some_and(|t| t.id == filter_type.id)
            })
            .map(|value_id| value_id.id.as_str())
            .ok_or_else(|| NormalizeError::MissingOptionValue {
                option_type_id: filter_type.id.clone(),
                variant_id: variant.id.clone(),
            })?;

        if !included_value_ids.insert(axis_value_id) {
            continue;
        }

        collected.extend(images(resolver, variant));
    }

    Ok(collected)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
