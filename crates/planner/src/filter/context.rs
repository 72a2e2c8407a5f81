//! Collaborators the filter compiler reads from.
//!
//! All of them are synchronous, read-only lookups. The compiler never caches
//! their answers, so every `compile` call sees the current catalog state.

use model::{
    catalog::{
        attribute::AttributeDescriptor,
        scope::{Scope, ScopeKind},
    },
    search::filter::FilterNode,
};
use std::sync::Arc;

use super::error::CompileError;

/// Suffix of the stock-status join prepared next to a filter's own join.
pub const STOCK_FILTER_SUFFIX: &str = "_stock";

pub trait AttributeMetadata: Send + Sync {
    fn attribute(&self, entity: &str, code: &str) -> Result<AttributeDescriptor, CompileError>;
}

pub trait EntityMetadata: Send + Sync {
    /// Column value tables join the entity table on. Differs from the
    /// identifier field when rows are versioned under a surrogate key.
    fn link_field(&self, entity: &str) -> Result<String, CompileError>;

    /// Column holding the public entity id.
    fn identifier_field(&self, entity: &str) -> Result<String, CompileError>;
}

pub trait ScopeResolver: Send + Sync {
    fn current_scope(&self) -> Scope;
}

/// Names the table alias a filter's join was registered under.
///
/// Must answer the same alias for the same filter within one compilation
/// pass. When out-of-stock products are hidden, a stock-status join must
/// exist under `alias_for(filter) + STOCK_FILTER_SUFFIX`.
pub trait AliasResolver: Send + Sync {
    fn alias_for(&self, filter: &FilterNode) -> String;
}

pub trait StoreConfig: Send + Sync {
    fn is_flag_set(&self, path: &str, scope: ScopeKind) -> bool;
}

/// Maps a logical table name to its physical name (prefixing and such).
pub trait TableResolver: Send + Sync {
    fn table_name(&self, name: &str) -> String;
}

/// Everything the compiler needs from its surroundings.
#[derive(Clone)]
pub struct CompilerContext {
    pub attributes: Arc<dyn AttributeMetadata>,
    pub entities: Arc<dyn EntityMetadata>,
    pub scope: Arc<dyn ScopeResolver>,
    pub aliases: Arc<dyn AliasResolver>,
    pub config: Arc<dyn StoreConfig>,
    pub tables: Arc<dyn TableResolver>,
}
