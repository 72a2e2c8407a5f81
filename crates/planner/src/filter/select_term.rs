//! TERM filters on `select`/`multiselect` attributes.
//!
//! The attribute's option values are already joined under the filter alias,
//! so the fragment only compares that join's `value` column.

use model::{
    catalog::scope::{STOCK_IN_STOCK, ScopeKind, XML_PATH_SHOW_OUT_OF_STOCK},
    search::filter::FilterValue,
};

use super::context::{STOCK_FILTER_SUFFIX, StoreConfig};
use crate::query::dialect::Dialect;

/// Renders `<alias>.value` compared against the filter value.
///
/// A set renders `IN (...)`, negated as `NOT IN (...)`. A scalar renders
/// `= v`, negated as `!= v`. An empty set is passed through as `IN ()`, which
/// the database rejects; callers are expected not to send one.
pub fn compile(
    alias: &str,
    value: &FilterValue,
    is_negation: bool,
    dialect: &dyn Dialect,
) -> String {
    let condition = match value {
        FilterValue::Set(values) => {
            let list = values
                .iter()
                .map(|v| dialect.quote_value(v))
                .collect::<Vec<_>>()
                .join(",");
            let keyword = if is_negation { "NOT IN" } else { "IN" };
            format!("{keyword} ({list})")
        }
        FilterValue::Scalar(v) => {
            let bang = if is_negation { "!" } else { "" };
            format!("{bang}= {}", dialect.quote_value(v))
        }
    };

    format!("{alias}.value {condition}")
}

/// Out-of-stock products are hidden unless the store says otherwise.
pub fn hides_out_of_stock(config: &dyn StoreConfig) -> bool {
    !config.is_flag_set(XML_PATH_SHOW_OUT_OF_STOCK, ScopeKind::Store)
}

/// Appends the stock conjunct against the stock join prepared for `alias`.
pub fn with_stock_filter(fragment: String, alias: &str) -> String {
    format!("{fragment} AND {alias}{STOCK_FILTER_SUFFIX}.stock_status = {STOCK_IN_STOCK}")
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use super::*;
    use crate::query::dialect::MySql;

    fn set(values: &[i64]) -> FilterValue {
        FilterValue::Set(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn test_set_values() {
        assert_eq!(
            compile("color_filter", &set(&[1, 2, 3]), false, &MySql),
            "color_filter.value IN (1,2,3)"
        );
        assert_eq!(
            compile("color_filter", &set(&[1, 2, 3]), true, &MySql),
            "color_filter.value NOT IN (1,2,3)"
        );
    }

    #[test]
    fn test_empty_set_is_rendered_verbatim() {
        assert_eq!(compile("a", &set(&[]), false, &MySql), "a.value IN ()");
        assert_eq!(compile("a", &set(&[]), true, &MySql), "a.value NOT IN ()");
    }

    #[test]
    fn test_scalar_values() {
        let red = FilterValue::Scalar(Value::from("red"));
        assert_eq!(compile("a", &red, false, &MySql), "a.value = 'red'");
        assert_eq!(compile("a", &red, true, &MySql), "a.value != 'red'");
    }

    #[test]
    fn test_quoted_set_members() {
        let values = FilterValue::Set(vec![Value::from("12"), Value::from("O'Neil")]);
        assert_eq!(
            compile("a", &values, false, &MySql),
            r"a.value IN ('12','O\'Neil')"
        );
    }

    #[test]
    fn test_stock_conjunct() {
        assert_eq!(
            with_stock_filter("a.value = 1".into(), "a"),
            "a.value = 1 AND a_stock.stock_status = 1"
        );
    }
}
