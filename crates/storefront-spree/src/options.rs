//! Folding Spree option values into storefront option lists.

use storefront_core::{ProductOption, ProductOptionValue};

use crate::document::{option_type, OptionType, OptionValue, RelationshipResolver};
use crate::error::NormalizeError;

/// Adds `option_value` (of `option_type`) to `options` and returns the list.
///
/// Options are keyed by display name and values by label within an option,
/// so repeated `(name, label)` pairs leave the list unchanged. Insertion
/// order is preserved.
#[must_use]
pub fn merge_option(
    mut options: Vec<ProductOption>,
    option_type: &OptionType,
    option_value: &OptionValue,
) -> Vec<ProductOption> {
    let name = &option_type.attributes.presentation;
    let label = &option_value.attributes.presentation;

    let index = if let Some(index) = options.iter().position(|o| &o.name == name) {
        index
    } else {
        options.push(ProductOption {
            id: option_type.id.clone(),
            name: name.clone(),
            values: Vec::new(),
        });
        options.len() - 1
    };

    let option = &mut options[index];
    if !option.values.iter().any(|v| &v.label == label) {
        option.values.push(ProductOptionValue {
            id: option_value.id.clone(),
            label: label.clone(),
        });
    }

    options
}

/// Resolves the option type of `option_value` and merges it into `options`.
///
/// # Errors
///
/// Returns [`NormalizeError::UnlinkedOptionValue`] when the value has no
/// resolvable `option_type` relationship.
pub fn expand_options<R: RelationshipResolver>(
    resolver: &R,
    option_value: &OptionValue,
    options: Vec<ProductOption>,
) -> Result<Vec<ProductOption>, NormalizeError> {
    let option_type =
        option_type(resolver, option_value).ok_or_else(|| NormalizeError::UnlinkedOptionValue {
            option_value_id: option_value.id.clone(),
        })?;
    Ok(merge_option(options, option_type, option_value))
}
