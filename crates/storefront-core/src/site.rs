use serde::{Deserialize, Serialize};

/// Category and brand navigation data for the storefront shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub categories: Vec<CategoryRecord>,
    pub brands: Vec<BrandRecord>,
}

/// A category taxon. `slug` and `path` both carry the taxon id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub path: String,
}

impl CategoryRecord {
    #[must_use]
    pub fn from_taxon(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            slug: id.to_owned(),
            path: id.to_owned(),
        }
    }
}

/// A brand taxon wrapped in the `node` envelope the storefront expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub node: BrandNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandNode {
    pub entity_id: String,
    /// `brands/<id>`
    pub path: String,
    pub name: String,
}

impl BrandRecord {
    #[must_use]
    pub fn from_taxon(id: &str, name: &str) -> Self {
        Self {
            node: BrandNode {
                entity_id: id.to_owned(),
                path: format!("brands/{id}"),
                name: name.to_owned(),
            },
        }
    }
}
