use model::search::filter::{FIELD_CATEGORY_IDS, FIELD_PRICE, FilterNode};

use super::context::AliasResolver;

/// Alias suffix of a regular attribute filter join.
pub const FILTER_SUFFIX: &str = "_filter";

/// Derives the alias purely from the field name, so it is stable across calls.
///
/// `price` joins the price index as `price_index` and `category_ids` the
/// category index as `category_ids_index`. Every other field joins as
/// `<field>_filter`.
#[derive(Debug, Clone, Default)]
pub struct FieldAliasResolver;

impl AliasResolver for FieldAliasResolver {
    fn alias_for(&self, filter: &FilterNode) -> String {
        match filter.field.as_str() {
            FIELD_PRICE => "price_index".to_string(),
            FIELD_CATEGORY_IDS => "category_ids_index".to_string(),
            field => format!("{field}{FILTER_SUFFIX}"),
        }
    }
}
