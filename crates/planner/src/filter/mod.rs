//! Compiles leaf search filters into SQL fragments for the search index query.
//!
//! The caller renders each leaf comparison against the bare field name
//! (`` `color` = 'red' ``) and hands it here together with the filter. The
//! compiler decides which table the field really lives in and returns a
//! condition the caller can drop into the `WHERE` clause of the outer query.
//! That query must expose the searched products as `search_index`.

use model::{
    catalog::attribute::PRODUCT_ENTITY,
    search::filter::{FIELD_PRICE, FilterNode},
};
use std::sync::Arc;
use tracing::debug;

use crate::query::{
    ast::expr::Expr,
    builder::select::{FromState, SelectBuilder},
    dialect::Dialect,
    renderer::to_sql,
    rewrite::rewrite_column,
    wrap_brackets,
};
use context::CompilerContext;
use error::CompileError;
use strategy::Strategy;

pub mod alias;
pub mod catalog;
pub mod context;
pub mod dynamic;
pub mod error;
pub mod range;
pub mod select_term;
pub mod strategy;

/// Logical name of the product entity table.
pub const ENTITY_TABLE: &str = "catalog_product_entity";

/// Column of the pre-joined price index that price filters compare against.
pub const MIN_PRICE_COLUMN: &str = "price_index.min_price";

/// Turns a per-entity sub-select into a condition on the outer query's rows.
///
/// `select` exposes `entity_id` plus a column aliased as the filtered field,
/// and `query` compares that alias. Where `HAVING` can see select aliases the
/// comparison filters the sub-select itself; otherwise it is applied to the
/// derived table, whose columns carry the alias names.
pub fn correlate(select: SelectBuilder<FromState>, query: &str, dialect: &dyn Dialect) -> String {
    let condition = wrap_brackets(query);
    if dialect.having_sees_select_aliases() {
        let select = select.having(Expr::Raw(condition)).build();
        format!(
            "search_index.entity_id IN (SELECT entity_id FROM {} AS filter)",
            wrap_brackets(&to_sql(&select, dialect))
        )
    } else {
        format!(
            "search_index.entity_id IN (SELECT entity_id FROM {} AS filter WHERE {condition})",
            wrap_brackets(&to_sql(&select.build(), dialect))
        )
    }
}

#[derive(Clone)]
pub struct FilterCompiler {
    ctx: CompilerContext,
    dialect: Arc<dyn Dialect>,
}

impl FilterCompiler {
    pub fn new(ctx: CompilerContext, dialect: Arc<dyn Dialect>) -> Self {
        Self { ctx, dialect }
    }

    pub fn context(&self) -> &CompilerContext {
        &self.ctx
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Resolves how `filter` will be compiled. Reserved fields are decided
    /// before any attribute lookup happens.
    pub fn strategy_for(&self, filter: &FilterNode) -> Result<Strategy, CompileError> {
        if let Some(strategy) = Strategy::reserved(&filter.field) {
            return Ok(strategy);
        }

        let attribute = self
            .ctx
            .attributes
            .attribute(PRODUCT_ENTITY, &filter.field)?;
        Ok(Strategy::for_attribute(filter.filter_type, attribute))
    }

    /// Compiles one leaf filter.
    ///
    /// `query` is the caller's comparison rendered against the bare field
    /// name. Depending on the strategy it is re-anchored, qualified, used as
    /// a `HAVING` predicate, or ignored in favour of the filter value.
    pub fn compile(
        &self,
        filter: &FilterNode,
        is_negation: bool,
        query: &str,
    ) -> Result<String, CompileError> {
        let strategy = self.strategy_for(filter)?;
        debug!(
            field = %filter.field,
            filter_type = %filter.filter_type,
            strategy = strategy.name(),
            "Compiling search filter"
        );

        let fragment = match &strategy {
            Strategy::Price => {
                rewrite_column(query, FIELD_PRICE, MIN_PRICE_COLUMN, self.dialect())
            }
            Strategy::CategoryIds => {
                let alias = self.ctx.aliases.alias_for(filter);
                let category_id = filter.value.to_int_lossy();
                format!("{alias}.category_id = {category_id}")
            }
            Strategy::Visibility => {
                let alias = self.ctx.aliases.alias_for(filter);
                format!("{alias}.{query}")
            }
            Strategy::Static(attribute) => {
                let alias = self.ctx.aliases.alias_for(filter);
                let column = format!("{alias}.{}", attribute.code);
                rewrite_column(query, &attribute.code, &column, self.dialect())
            }
            Strategy::SelectTerm(_) => {
                let alias = self.ctx.aliases.alias_for(filter);
                let fragment = select_term::compile(
                    &alias,
                    &filter.value,
                    is_negation,
                    self.dialect(),
                );
                if select_term::hides_out_of_stock(self.ctx.config.as_ref()) {
                    select_term::with_stock_filter(fragment, &alias)
                } else {
                    fragment
                }
            }
            Strategy::NumericRange(attribute) => {
                range::compile(self, &filter.field, query, attribute)?
            }
            Strategy::Dynamic(attribute) => {
                dynamic::compile(self, &filter.field, query, attribute)?
            }
        };

        debug!(field = %filter.field, %fragment, "Search filter compiled");
        Ok(fragment)
    }
}
