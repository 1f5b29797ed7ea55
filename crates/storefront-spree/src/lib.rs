pub mod client;
pub mod document;
pub mod error;
pub mod images;
pub mod normalize;
pub mod options;
pub mod site_info;
pub mod taxonomy;
pub mod types;

pub use client::SpreeClient;
pub use document::{CompoundDocument, RelationshipResolver, Resource, ResourceStore};
pub use error::{NormalizeError, SpreeError};
pub use normalize::{normalize_product, normalize_products, ImageStrategy, NormalizeOptions};
pub use site_info::{get_site_info, SiteInfoOptions, TaxonSource};
pub use taxonomy::{compare_taxons, sort_taxons};
pub use types::{ProductAttributes, TaxonAttributes};
