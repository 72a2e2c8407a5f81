//! RANGE filters on `int`/`decimal` attributes, answered from the EAV index.
//!
//! The index already holds one resolved value per (entity, attribute, store),
//! so no default-store fallback is needed here.

use model::{
    catalog::attribute::{AttributeDescriptor, BackendType, PRODUCT_ENTITY},
    core::value::Value,
};

use super::{ENTITY_TABLE, FilterCompiler, correlate, error::CompileError};
use crate::{
    query::{alias, ast::common::JoinKind, builder::select::SelectBuilder, eq, qualified, value},
    table_ref,
};

const INDEX_TABLE: &str = "catalog_product_index_eav";

/// Index table matching the attribute's storage kind.
pub fn index_table(attribute: &AttributeDescriptor) -> String {
    match attribute.backend_type {
        BackendType::Decimal => format!("{INDEX_TABLE}_decimal"),
        _ => INDEX_TABLE.to_string(),
    }
}

pub fn compile(
    compiler: &FilterCompiler,
    field: &str,
    query: &str,
    attribute: &AttributeDescriptor,
) -> Result<String, CompileError> {
    let ctx = compiler.context();
    let table = ctx.tables.table_name(&index_table(attribute));
    let entity_table = ctx.tables.table_name(ENTITY_TABLE);
    let entity_field = ctx.entities.identifier_field(PRODUCT_ENTITY)?;
    let store_id = ctx.scope.current_scope().id;

    let select = SelectBuilder::new()
        .select(vec![
            qualified("e", "entity_id"),
            alias(qualified("main_table", "value"), field),
        ])
        .from(table_ref!(entity_table), Some("e"))
        .join(
            JoinKind::Inner,
            table_ref!(table),
            Some("main_table"),
            eq(
                qualified("main_table", &entity_field),
                qualified("e", &entity_field),
            ),
        )
        .where_clause(eq(
            qualified("main_table", "attribute_id"),
            value(Value::Int(attribute.attribute_id)),
        ))
        .where_clause(eq(
            qualified("main_table", "store_id"),
            value(Value::Int(store_id)),
        ));

    Ok(correlate(select, query, compiler.dialect()))
}
