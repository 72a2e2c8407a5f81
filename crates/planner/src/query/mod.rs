use crate::query::ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;
pub mod rewrite;

pub fn qualified(qualifier: &str, name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: Some(qualifier.to_string()),
        name: name.to_string(),
    })
}

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp(Box::new(BinaryOp {
        left,
        op: BinaryOperator::Eq,
        right,
    }))
}

pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::FunctionCall(FunctionCall {
        name: name.to_string(),
        args,
    })
}

pub fn alias(expr: Expr, alias: &str) -> Expr {
    Expr::Alias {
        expr: Box::new(expr),
        alias: alias.to_string(),
    }
}

/// Wraps a rendered sub-select in parentheses.
pub fn wrap_brackets(sql: &str) -> String {
    format!("({sql})")
}
