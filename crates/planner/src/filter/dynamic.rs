//! Every other attribute filter: a correlated subquery over the attribute's
//! raw value table.
//!
//! `main_table` is pinned to the default store row, which every entity with a
//! value has, and `current_store` optionally brings in the override for the
//! current store. Both joins are keyed on the entity link field, so each
//! entity contributes at most one row and the coalesced column carries the
//! override when present, else the default.

use model::{
    catalog::{
        attribute::{AttributeDescriptor, PRODUCT_ENTITY},
        scope::DEFAULT_STORE_ID,
    },
    core::value::Value,
};

use super::{ENTITY_TABLE, FilterCompiler, correlate, error::CompileError};
use crate::{
    query::{
        alias,
        ast::{common::JoinKind, expr::Expr},
        builder::select::SelectBuilder,
        eq, func, qualified, value,
    },
    table_ref,
};

pub fn compile(
    compiler: &FilterCompiler,
    field: &str,
    query: &str,
    attribute: &AttributeDescriptor,
) -> Result<String, CompileError> {
    let ctx = compiler.context();
    let dialect = compiler.dialect();
    let table = ctx.tables.table_name(&attribute.backend_table());
    let entity_table = ctx.tables.table_name(ENTITY_TABLE);
    let link_field = ctx.entities.link_field(PRODUCT_ENTITY)?;
    let store_id = ctx.scope.current_scope().id;

    let store_value = func(
        dialect.if_null_function(),
        vec![
            qualified("current_store", "value"),
            qualified("main_table", "value"),
        ],
    );

    let select = SelectBuilder::new()
        .select(vec![qualified("e", "entity_id"), alias(store_value, field)])
        .from(table_ref!(entity_table), Some("e"))
        .join(
            JoinKind::Inner,
            table_ref!(table),
            Some("main_table"),
            eq(
                qualified("main_table", &link_field),
                qualified("e", &link_field),
            ),
        )
        .join(
            JoinKind::Left,
            table_ref!(table),
            Some("current_store"),
            Expr::Conjunction(vec![
                eq(
                    qualified("current_store", "attribute_id"),
                    qualified("main_table", "attribute_id"),
                ),
                eq(
                    qualified("current_store", "store_id"),
                    value(Value::Int(store_id)),
                ),
                eq(
                    qualified("current_store", &link_field),
                    qualified("main_table", &link_field),
                ),
            ]),
        )
        .where_clause(eq(
            qualified("main_table", "attribute_id"),
            value(Value::Int(attribute.attribute_id)),
        ))
        .where_clause(eq(
            qualified("main_table", "store_id"),
            value(Value::Int(DEFAULT_STORE_ID)),
        ));

    Ok(correlate(select, query, dialect))
}
