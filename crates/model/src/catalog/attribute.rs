//! Attribute metadata of the EAV product catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kind every catalog lookup is made against.
pub const PRODUCT_ENTITY: &str = "catalog_product";

/// Storage kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Static,
    Varchar,
    Int,
    Decimal,
    Text,
    Datetime,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Static => "static",
            BackendType::Varchar => "varchar",
            BackendType::Int => "int",
            BackendType::Decimal => "decimal",
            BackendType::Text => "text",
            BackendType::Datetime => "datetime",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, BackendType::Int | BackendType::Decimal)
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the attribute is edited in the admin, which decides whether its
/// values are option ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendInput {
    Select,
    Multiselect,
    Text,
    Textarea,
    Price,
    Date,
    Boolean,
    Weight,
    #[serde(untagged)]
    Other(String),
}

impl FrontendInput {
    pub fn is_selection(&self) -> bool {
        matches!(self, FrontendInput::Select | FrontendInput::Multiselect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub code: String,
    pub attribute_id: i64,
    pub backend_type: BackendType,
    pub frontend_input: FrontendInput,
    /// Value table for non-static attributes, e.g. `catalog_product_entity_int`.
    /// Derived from the backend type when absent.
    #[serde(default)]
    pub backend_table: Option<String>,
}

impl AttributeDescriptor {
    pub fn is_static(&self) -> bool {
        self.backend_type == BackendType::Static
    }

    /// Logical name of the table holding this attribute's values.
    pub fn backend_table(&self) -> String {
        match &self.backend_table {
            Some(table) => table.clone(),
            None if self.is_static() => "catalog_product_entity".to_string(),
            None => format!("catalog_product_entity_{}", self.backend_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_table_defaults() {
        let attr = AttributeDescriptor {
            code: "color".into(),
            attribute_id: 93,
            backend_type: BackendType::Int,
            frontend_input: FrontendInput::Select,
            backend_table: None,
        };
        assert_eq!(attr.backend_table(), "catalog_product_entity_int");
        assert!(!attr.is_static());

        let sku = AttributeDescriptor {
            code: "sku".into(),
            attribute_id: 74,
            backend_type: BackendType::Static,
            frontend_input: FrontendInput::Text,
            backend_table: None,
        };
        assert_eq!(sku.backend_table(), "catalog_product_entity");
        assert!(sku.is_static());
    }

    #[test]
    fn test_unknown_frontend_input() {
        let input: FrontendInput = serde_json::from_str(r#""swatch_visual""#).unwrap();
        assert_eq!(input, FrontendInput::Other("swatch_visual".into()));
        assert!(!input.is_selection());

        let input: FrontendInput = serde_json::from_str(r#""multiselect""#).unwrap();
        assert!(input.is_selection());
    }
}
