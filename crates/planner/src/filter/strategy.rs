//! Chooses how a filter is turned into SQL.

use model::{
    catalog::attribute::AttributeDescriptor,
    search::filter::{FIELD_CATEGORY_IDS, FIELD_PRICE, FIELD_VISIBILITY, FilterType},
};
use serde::Serialize;

/// One variant per fragment shape. Exactly one applies to any filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "attribute", rename_all = "snake_case")]
pub enum Strategy {
    /// Comparison re-pointed at the pre-joined minimal price index.
    Price,
    /// Equality on the joined category index.
    CategoryIds,
    /// Caller's predicate qualified with the visibility join alias.
    Visibility,
    /// Column of the entity row itself.
    Static(AttributeDescriptor),
    /// Option id match on the attribute's joined value table.
    SelectTerm(AttributeDescriptor),
    /// Correlated subquery over the per-store EAV index.
    NumericRange(AttributeDescriptor),
    /// Correlated subquery over the raw value table with store fallback.
    Dynamic(AttributeDescriptor),
}

impl Strategy {
    /// Strategies for fields that bypass attribute metadata entirely.
    pub fn reserved(field: &str) -> Option<Self> {
        match field {
            FIELD_PRICE => Some(Strategy::Price),
            FIELD_CATEGORY_IDS => Some(Strategy::CategoryIds),
            FIELD_VISIBILITY => Some(Strategy::Visibility),
            _ => None,
        }
    }

    /// Order matters: a static attribute never reaches the EAV strategies.
    pub fn for_attribute(filter_type: FilterType, attribute: AttributeDescriptor) -> Self {
        if attribute.is_static() {
            Strategy::Static(attribute)
        } else if filter_type == FilterType::Term && attribute.frontend_input.is_selection() {
            Strategy::SelectTerm(attribute)
        } else if filter_type == FilterType::Range && attribute.backend_type.is_numeric() {
            Strategy::NumericRange(attribute)
        } else {
            Strategy::Dynamic(attribute)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Price => "price",
            Strategy::CategoryIds => "category_ids",
            Strategy::Visibility => "visibility",
            Strategy::Static(_) => "static",
            Strategy::SelectTerm(_) => "select_term",
            Strategy::NumericRange(_) => "numeric_range",
            Strategy::Dynamic(_) => "dynamic",
        }
    }
}

#[cfg(test)]
mod tests {
    use model::catalog::attribute::{BackendType, FrontendInput};

    use super::*;

    fn attribute(backend_type: BackendType, frontend_input: FrontendInput) -> AttributeDescriptor {
        AttributeDescriptor {
            code: "attr".into(),
            attribute_id: 1,
            backend_type,
            frontend_input,
            backend_table: None,
        }
    }

    #[test]
    fn test_reserved_fields() {
        assert_eq!(Strategy::reserved("price"), Some(Strategy::Price));
        assert_eq!(Strategy::reserved("category_ids"), Some(Strategy::CategoryIds));
        assert_eq!(Strategy::reserved("visibility"), Some(Strategy::Visibility));
        assert_eq!(Strategy::reserved("color"), None);
    }

    #[test]
    fn test_dispatch_matrix() {
        use BackendType::*;
        use FilterType::*;

        let cases = [
            (Term, Static, FrontendInput::Select, "static"),
            (Range, Static, FrontendInput::Text, "static"),
            (Term, Int, FrontendInput::Select, "select_term"),
            (Term, Varchar, FrontendInput::Multiselect, "select_term"),
            (Range, Int, FrontendInput::Select, "numeric_range"),
            (Range, Decimal, FrontendInput::Price, "numeric_range"),
            (Range, Varchar, FrontendInput::Text, "dynamic"),
            (Range, Datetime, FrontendInput::Date, "dynamic"),
            (Term, Decimal, FrontendInput::Price, "dynamic"),
            (Term, Text, FrontendInput::Textarea, "dynamic"),
        ];

        for (filter_type, backend, input, expected) in cases {
            let strategy = Strategy::for_attribute(filter_type, attribute(backend, input.clone()));
            assert_eq!(
                strategy.name(),
                expected,
                "{filter_type} filter on {backend} / {input:?}"
            );
        }
    }

    #[test]
    fn test_serialize_for_diagnostics() {
        let json = serde_json::to_value(Strategy::Price).unwrap();
        assert_eq!(json, serde_json::json!({ "strategy": "price" }));
    }
}
