use serde::{Deserialize, Serialize};

/// Store id of the global scope; its value rows are the fallback for every store.
pub const DEFAULT_STORE_ID: i64 = 0;

/// `stock_status` of an in-stock product in the stock index.
pub const STOCK_IN_STOCK: i64 = 1;

/// Config path deciding whether out-of-stock products stay visible.
pub const XML_PATH_SHOW_OUT_OF_STOCK: &str = "cataloginventory/options/show_out_of_stock";

/// Config scope kinds accepted by a store config reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Default,
    Website,
    Store,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub id: i64,
}

impl Scope {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_ID)
    }
}
