//! In-memory catalog answering every metadata question the compiler asks.
//!
//! Loaded from JSON by the CLI and built by hand in tests.

use model::catalog::{
    attribute::{AttributeDescriptor, PRODUCT_ENTITY},
    scope::{Scope, ScopeKind},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

use super::{
    context::{AttributeMetadata, EntityMetadata, ScopeResolver, StoreConfig, TableResolver},
    error::CompileError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLinks {
    pub link_field: String,
    pub identifier_field: String,
}

impl Default for EntityLinks {
    fn default() -> Self {
        Self {
            link_field: "entity_id".to_string(),
            identifier_field: "entity_id".to_string(),
        }
    }
}

fn default_entities() -> HashMap<String, EntityLinks> {
    HashMap::from([(PRODUCT_ENTITY.to_string(), EntityLinks::default())])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Prepended to every logical table name.
    #[serde(default)]
    pub table_prefix: String,

    /// Store the current request runs in.
    #[serde(default)]
    pub store_id: i64,

    #[serde(default = "default_entities")]
    pub entities: HashMap<String, EntityLinks>,

    /// Product attributes.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    /// Store config flags by path. Unset paths read as `false`.
    #[serde(default)]
    pub flags: HashMap<String, bool>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            table_prefix: String::new(),
            store_id: 0,
            entities: default_entities(),
            attributes: Vec::new(),
            flags: HashMap::new(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.retain(|a| a.code != attribute.code);
        self.attributes.push(attribute);
        self
    }

    pub fn with_store(mut self, store_id: i64) -> Self {
        self.store_id = store_id;
        self
    }

    pub fn with_flag(mut self, path: &str, value: bool) -> Self {
        self.flags.insert(path.to_string(), value);
        self
    }

    pub fn with_table_prefix(mut self, prefix: &str) -> Self {
        self.table_prefix = prefix.to_string();
        self
    }

    pub fn with_entity(mut self, entity: &str, links: EntityLinks) -> Self {
        self.entities.insert(entity.to_string(), links);
        self
    }

    fn links(&self, entity: &str) -> Result<&EntityLinks, CompileError> {
        self.entities
            .get(entity)
            .ok_or_else(|| CompileError::LinkFieldResolution {
                entity: entity.to_string(),
            })
    }
}

impl AttributeMetadata for Catalog {
    fn attribute(&self, entity: &str, code: &str) -> Result<AttributeDescriptor, CompileError> {
        let found = (entity == PRODUCT_ENTITY)
            .then(|| self.attributes.iter().find(|a| a.code == code))
            .flatten();

        match found {
            Some(attribute) => {
                trace!(code, attribute_id = attribute.attribute_id, "Attribute resolved");
                Ok(attribute.clone())
            }
            None => Err(CompileError::AttributeNotFound {
                entity: entity.to_string(),
                field: code.to_string(),
            }),
        }
    }
}

impl EntityMetadata for Catalog {
    fn link_field(&self, entity: &str) -> Result<String, CompileError> {
        Ok(self.links(entity)?.link_field.clone())
    }

    fn identifier_field(&self, entity: &str) -> Result<String, CompileError> {
        Ok(self.links(entity)?.identifier_field.clone())
    }
}

impl ScopeResolver for Catalog {
    fn current_scope(&self) -> Scope {
        Scope::new(self.store_id)
    }
}

impl StoreConfig for Catalog {
    // Flags are kept per store view only, so every scope kind reads the same map.
    fn is_flag_set(&self, path: &str, _scope: ScopeKind) -> bool {
        self.flags.get(path).copied().unwrap_or(false)
    }
}

impl TableResolver for Catalog {
    fn table_name(&self, name: &str) -> String {
        format!("{}{}", self.table_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use model::catalog::attribute::{BackendType, FrontendInput};

    use super::*;

    const CATALOG_JSON: &str = r#"{
        "table_prefix": "m2_",
        "store_id": 3,
        "attributes": [
            {
                "code": "color",
                "attribute_id": 93,
                "backend_type": "int",
                "frontend_input": "select"
            }
        ],
        "flags": { "cataloginventory/options/show_out_of_stock": true }
    }"#;

    #[test]
    fn test_load_from_json() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();

        let color = catalog.attribute(PRODUCT_ENTITY, "color").unwrap();
        assert_eq!(color.attribute_id, 93);
        assert_eq!(color.backend_type, BackendType::Int);
        assert_eq!(color.frontend_input, FrontendInput::Select);

        assert_eq!(catalog.current_scope(), Scope::new(3));
        assert_eq!(catalog.table_name("catalog_product_entity"), "m2_catalog_product_entity");
        assert!(catalog.is_flag_set(
            "cataloginventory/options/show_out_of_stock",
            ScopeKind::Store
        ));
        assert_eq!(catalog.link_field(PRODUCT_ENTITY).unwrap(), "entity_id");
    }

    #[test]
    fn test_unknown_attribute() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.attribute(PRODUCT_ENTITY, "shoe_size"),
            Err(CompileError::AttributeNotFound {
                entity: PRODUCT_ENTITY.to_string(),
                field: "shoe_size".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_entity_links() {
        let catalog = Catalog::from_json(r#"{ "entities": {} }"#).unwrap();
        assert_eq!(
            catalog.link_field(PRODUCT_ENTITY),
            Err(CompileError::LinkFieldResolution {
                entity: PRODUCT_ENTITY.to_string(),
            })
        );
    }

    #[test]
    fn test_unset_flag_reads_false() {
        assert!(!Catalog::new().is_flag_set("any/path", ScopeKind::Default));
    }
}
