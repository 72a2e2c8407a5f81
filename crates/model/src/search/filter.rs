//! Leaf filters of a search request, as handed to the filter compiler.

use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field names that never resolve through attribute metadata.
pub const FIELD_PRICE: &str = "price";
pub const FIELD_CATEGORY_IDS: &str = "category_ids";
pub const FIELD_VISIBILITY: &str = "visibility";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Term,
    Range,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::Term => write!(f, "term"),
            FilterType::Range => write!(f, "range"),
        }
    }
}

impl std::str::FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "term" => Ok(FilterType::Term),
            "range" => Ok(FilterType::Range),
            other => Err(format!("Unknown filter type: {other}")),
        }
    }
}

/// The value side of a filter: one scalar or a set of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Set(Vec<Value>),
    Scalar(Value),
}

impl FilterValue {
    /// Integer reading of the whole value. A set reads as 1 when it has
    /// members and 0 when empty, whatever the members are; a scalar goes
    /// through `Value::to_int_lossy`.
    pub fn to_int_lossy(&self) -> i64 {
        match self {
            FilterValue::Scalar(v) => v.to_int_lossy(),
            FilterValue::Set(values) => i64::from(!values.is_empty()),
        }
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        FilterValue::Scalar(value)
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(values: Vec<Value>) -> Self {
        FilterValue::Set(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterNode {
    pub field: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub value: FilterValue,
}

impl FilterNode {
    pub fn new(field: impl Into<String>, filter_type: FilterType, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            filter_type,
            value,
        }
    }

    pub fn term(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterType::Term, value.into())
    }

    /// A range filter. The bounds themselves travel in the rendered
    /// comparison text, so the value is only informative here.
    pub fn range(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterType::Range, value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_filter_node() {
        let node: FilterNode =
            serde_json::from_str(r#"{"field": "color", "type": "term", "value": [1, 2]}"#)
                .unwrap();
        assert_eq!(node.filter_type, FilterType::Term);
        assert_eq!(
            node.value,
            FilterValue::Set(vec![Value::Int(1), Value::Int(2)])
        );

        let node: FilterNode =
            serde_json::from_str(r#"{"field": "weight", "type": "range", "value": "10"}"#)
                .unwrap();
        assert_eq!(node.value, FilterValue::Scalar(Value::from("10")));
    }

    #[test]
    fn test_value_int_coercion() {
        assert_eq!(FilterValue::Scalar(Value::from("42")).to_int_lossy(), 42);
        assert_eq!(FilterValue::Scalar(Value::from("abc")).to_int_lossy(), 0);
        assert_eq!(FilterValue::Set(vec![Value::Int(5), Value::Int(7)]).to_int_lossy(), 1);
        assert_eq!(FilterValue::Set(vec![Value::Int(0)]).to_int_lossy(), 1);
        assert_eq!(FilterValue::Set(vec![]).to_int_lossy(), 0);
    }

    #[test]
    fn test_filter_type_from_str() {
        assert_eq!("TERM".parse::<FilterType>(), Ok(FilterType::Term));
        assert_eq!("range".parse::<FilterType>(), Ok(FilterType::Range));
        assert!("wildcard".parse::<FilterType>().is_err());
    }
}
