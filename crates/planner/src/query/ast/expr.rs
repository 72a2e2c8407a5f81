//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `e` or `e.entity_id`.
    Identifier(Ident),

    /// A literal value, inlined into the SQL text when rendered.
    Value(Value),

    /// A binary operation, e.g., `main_table.store_id = 0`.
    BinaryOp(Box<BinaryOp>),

    /// Conditions joined with `AND`, rendered without extra nesting.
    Conjunction(Vec<Expr>),

    /// A function call, e.g., `IFNULL(a, b)`.
    FunctionCall(FunctionCall),

    /// An aliased expression, e.g. `main_table.value AS weight`
    Alias { expr: Box<Expr>, alias: String },

    /// Caller-supplied SQL text, emitted verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'e' in 'e.entity_id'
    pub name: String,              // e.g., the 'entity_id' in 'e.entity_id'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq, // =
}
