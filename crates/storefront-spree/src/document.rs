//! Typed model of Spree's JSON:API compound documents.
//!
//! A response carries primary `data` (one resource or a list) and a flat
//! `included` pool of related resources. Relationships reference pool entries
//! by `{type, id}` identifiers. The pool is indexed once into a
//! [`ResourceStore`] keyed by resource kind and id; lookups through
//! [`RelationshipResolver`] never mutate the document.

use std::collections::HashMap;
use std::slice;

use serde::Deserialize;

use crate::types::{
    ImageAttributes, OptionTypeAttributes, OptionValueAttributes, ProductAttributes,
    TaxonAttributes, VariantAttributes,
};

pub const PRIMARY_VARIANT: &str = "primary_variant";
pub const VARIANTS: &str = "variants";
pub const OPTION_TYPES: &str = "option_types";
pub const OPTION_VALUES: &str = "option_values";
pub const OPTION_TYPE: &str = "option_type";
pub const IMAGES: &str = "images";
pub const PARENT: &str = "parent";

/// `{type, id}` reference to a resource in the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// The `data` member of a relationship.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
    /// `null` or an absent `data` member.
    #[default]
    Empty,
}

impl RelationshipData {
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            Self::Many(ids) => ids,
            Self::One(id) => slice::from_ref(id),
            Self::Empty => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: RelationshipData,
}

/// A resource object whose `attributes` deserialize into `A`.
///
/// The `type` member is implied by `A` (see [`ResourceAttributes::KIND`]).
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    pub attributes: A,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl<A> Resource<A> {
    /// Identifiers listed under `name`, or an empty slice when the
    /// relationship is absent or `null`.
    #[must_use]
    pub fn related(&self, name: &str) -> &[ResourceIdentifier] {
        self.relationships
            .get(name)
            .map_or(&[], |r| r.data.identifiers())
    }
}

impl Resource<TaxonAttributes> {
    /// Id of the parent taxon, `None` for a taxonomy root.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.related(PARENT).first().map(|id| id.id.as_str())
    }
}

pub type Product = Resource<ProductAttributes>;
pub type Variant = Resource<VariantAttributes>;
pub type OptionType = Resource<OptionTypeAttributes>;
pub type OptionValue = Resource<OptionValueAttributes>;
pub type Image = Resource<ImageAttributes>;
pub type Taxon = Resource<TaxonAttributes>;

/// Attribute payloads that identify a JSON:API resource kind and know where
/// resources of that kind live in a [`ResourceStore`].
pub trait ResourceAttributes: Sized {
    const KIND: &'static str;

    fn pool(store: &ResourceStore) -> &HashMap<String, Resource<Self>>;
}

macro_rules! resource_kind {
    ($attrs:ty, $kind:literal, $field:ident) => {
        impl ResourceAttributes for $attrs {
            const KIND: &'static str = $kind;

            fn pool(store: &ResourceStore) -> &HashMap<String, Resource<Self>> {
                &store.$field
            }
        }
    };
}

resource_kind!(ProductAttributes, "product", products);
resource_kind!(VariantAttributes, "variant", variants);
resource_kind!(OptionTypeAttributes, "option_type", option_types);
resource_kind!(OptionValueAttributes, "option_value", option_values);
resource_kind!(ImageAttributes, "image", images);
resource_kind!(TaxonAttributes, "taxon", taxons);

/// One entry of the `included` array. Kinds we never read are dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IncludedResource {
    Product(Product),
    Variant(Variant),
    OptionType(OptionType),
    OptionValue(OptionValue),
    Image(Image),
    Taxon(Taxon),
    #[serde(other)]
    Unknown,
}

/// Index of included resources keyed by kind and id.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    products: HashMap<String, Product>,
    variants: HashMap<String, Variant>,
    option_types: HashMap<String, OptionType>,
    option_values: HashMap<String, OptionValue>,
    images: HashMap<String, Image>,
    taxons: HashMap<String, Taxon>,
}

impl ResourceStore {
    fn from_included(included: Vec<IncludedResource>) -> Self {
        let mut store = Self::default();
        for resource in included {
            match resource {
                IncludedResource::Product(r) => {
                    store.products.insert(r.id.clone(), r);
                }
                IncludedResource::Variant(r) => {
                    store.variants.insert(r.id.clone(), r);
                }
                IncludedResource::OptionType(r) => {
                    store.option_types.insert(r.id.clone(), r);
                }
                IncludedResource::OptionValue(r) => {
                    store.option_values.insert(r.id.clone(), r);
                }
                IncludedResource::Image(r) => {
                    store.images.insert(r.id.clone(), r);
                }
                IncludedResource::Taxon(r) => {
                    store.taxons.insert(r.id.clone(), r);
                }
                IncludedResource::Unknown => {}
            }
        }
        store
    }

    #[must_use]
    pub fn get<A: ResourceAttributes>(&self, id: &str) -> Option<&Resource<A>> {
        A::pool(self).get(id)
    }

    /// Total number of indexed resources across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
            + self.variants.len()
            + self.option_types.len()
            + self.option_values.len()
            + self.images.len()
            + self.taxons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up related resources inside a compound document.
///
/// Identifiers whose `type` does not match `A::KIND`, or that point at
/// resources missing from the document, are skipped.
pub trait RelationshipResolver {
    fn resolve<A: ResourceAttributes>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Option<&Resource<A>>;

    /// First resource linked under `relationship`.
    fn find_one<A: ResourceAttributes, B>(
        &self,
        from: &Resource<B>,
        relationship: &str,
    ) -> Option<&Resource<A>> {
        from.related(relationship)
            .iter()
            .find_map(|id| self.resolve::<A>(id))
    }

    /// Every resource linked under `relationship`, in relationship order.
    fn find_many<A: ResourceAttributes, B>(
        &self,
        from: &Resource<B>,
        relationship: &str,
    ) -> Vec<&Resource<A>> {
        from.related(relationship)
            .iter()
            .filter_map(|id| self.resolve::<A>(id))
            .collect()
    }
}

impl RelationshipResolver for ResourceStore {
    fn resolve<A: ResourceAttributes>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Option<&Resource<A>> {
        if identifier.kind != A::KIND {
            return None;
        }
        self.get::<A>(&identifier.id)
    }
}

/// Primary `data` of a document: a single resource or a collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData<T> {
    Many(Vec<Resource<T>>),
    One(Resource<T>),
}

/// Paging counters Spree attaches to collection responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListMeta {
    /// Resources on this page.
    pub count: u32,
    pub total_count: u32,
    pub total_pages: u32,
}

#[derive(Deserialize)]
struct RawDocument<T> {
    data: PrimaryData<T>,
    #[serde(default)]
    included: Vec<IncludedResource>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

/// A parsed JSON:API response whose primary resources carry attributes `T`.
#[derive(Debug, Clone)]
pub struct CompoundDocument<T> {
    data: PrimaryData<T>,
    store: ResourceStore,
    meta: Option<ListMeta>,
}

impl<T> CompoundDocument<T> {
    /// Primary resources, one element for single-resource responses.
    #[must_use]
    pub fn primary(&self) -> &[Resource<T>] {
        match &self.data {
            PrimaryData::Many(resources) => resources,
            PrimaryData::One(resource) => slice::from_ref(resource),
        }
    }

    #[must_use]
    pub fn into_primary(self) -> Vec<Resource<T>> {
        match self.data {
            PrimaryData::Many(resources) => resources,
            PrimaryData::One(resource) => vec![resource],
        }
    }

    #[must_use]
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Paging counters; `None` for single-resource responses.
    #[must_use]
    pub fn meta(&self) -> Option<ListMeta> {
        self.meta
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CompoundDocument<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawDocument::<T>::deserialize(deserializer)?;
        Ok(Self {
            data: raw.data,
            store: ResourceStore::from_included(raw.included),
            meta: raw.meta,
        })
    }
}

impl<T> RelationshipResolver for CompoundDocument<T> {
    fn resolve<A: ResourceAttributes>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Option<&Resource<A>> {
        self.store.resolve(identifier)
    }
}

// Typed accessors, one per relationship the pipelines walk.

pub fn primary_variant<'a, R: RelationshipResolver>(
    resolver: &'a R,
    product: &Product,
) -> Option<&'a Variant> {
    resolver.find_one(product, PRIMARY_VARIANT)
}

pub fn variants<'a, R: RelationshipResolver>(
    resolver: &'a R,
    product: &Product,
) -> Vec<&'a Variant> {
    resolver.find_many(product, VARIANTS)
}

pub fn option_types<'a, R: RelationshipResolver>(
    resolver: &'a R,
    product: &Product,
) -> Vec<&'a OptionType> {
    resolver.find_many(product, OPTION_TYPES)
}

pub fn option_values<'a, R: RelationshipResolver>(
    resolver: &'a R,
    variant: &Variant,
) -> Vec<&'a OptionValue> {
    resolver.find_many(variant, OPTION_VALUES)
}

pub fn option_type<'a, R: RelationshipResolver>(
    resolver: &'a R,
    option_value: &OptionValue,
) -> Option<&'a OptionType> {
    resolver.find_one(option_value, OPTION_TYPE)
}

pub fn images<'a, R: RelationshipResolver>(
    resolver: &'a R,
    variant: &Variant,
) -> Vec<&'a Image> {
    resolver.find_many(variant, IMAGES)
}
