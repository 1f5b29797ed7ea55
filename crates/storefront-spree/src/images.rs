//! Absolute image URLs for Spree image resources.

use storefront_core::ProductImage;

use crate::document::Image;
use crate::types::ImageStyle;

/// Smallest edge, in pixels, a resized style needs to stand in for the
/// original on product pages.
pub const MIN_IMAGE_EDGE: u32 = 800;

/// Returns an absolute URL for `image`, or `None` if it has no usable URL.
///
/// Prefers `original_url`, then the smallest style covering
/// [`MIN_IMAGE_EDGE`] in both dimensions, then the largest style. Relative
/// URLs are joined onto `image_host`.
#[must_use]
pub fn resolve_image_url(image_host: &str, image: &Image) -> Option<String> {
    let url = image
        .attributes
        .original_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .or_else(|| pick_style(&image.attributes.styles).map(|s| s.url.as_str()))?;

    Some(absolute_url(image_host, url))
}

fn pick_style(styles: &[ImageStyle]) -> Option<&ImageStyle> {
    let area = |s: &ImageStyle| u64::from(s.width.unwrap_or(0)) * u64::from(s.height.unwrap_or(0));

    styles
        .iter()
        .filter(|s| {
            s.width.unwrap_or(0) >= MIN_IMAGE_EDGE && s.height.unwrap_or(0) >= MIN_IMAGE_EDGE
        })
        .min_by_key(|s| area(s))
        .or_else(|| styles.iter().max_by_key(|s| area(s)))
        .filter(|s| !s.url.is_empty())
}

fn absolute_url(image_host: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{rest}");
    }
    format!(
        "{}/{}",
        image_host.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Maps image resources to storefront images, dropping those without a URL.
#[must_use]
pub fn media_gallery(image_host: &str, images: &[&Image]) -> Vec<ProductImage> {
    images
        .iter()
        .filter_map(|image| {
            resolve_image_url(image_host, image).map(|url| ProductImage {
                url,
                alt: image.attributes.alt.clone().unwrap_or_default(),
            })
        })
        .collect()
}
