//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::value::Value;
use std::{fmt, str::FromStr, sync::Arc};

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// The character `quote_identifier` wraps identifiers in.
    fn identifier_quote(&self) -> char;

    /// Quotes a possibly qualified identifier segment by segment, so
    /// `price_index.min_price` becomes `` `price_index`.`min_price` ``.
    fn quote_qualified(&self, ident: &str) -> String {
        ident
            .split('.')
            .map(|part| self.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Renders a value as an inline SQL literal.
    fn quote_value(&self, value: &Value) -> String;

    /// Name of the two-argument function returning its first non-NULL argument.
    ///
    /// - MySQL: `IFNULL`
    /// - PostgreSQL: `COALESCE`
    fn if_null_function(&self) -> &'static str;

    /// Whether a `HAVING` clause may reference aliases from the select list.
    ///
    /// MySQL resolves them; PostgreSQL only sees source columns, so filters
    /// on computed columns must go through a derived table instead.
    fn having_sees_select_aliases(&self) -> bool;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn quote_value(&self, value: &Value) -> String {
        match value {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(true) => "TRUE".into(),
            Value::Boolean(false) => "FALSE".into(),
            Value::Null => "NULL".into(),
            Value::String(v) => format!("'{}'", v.replace('\'', "''")),
        }
    }

    fn if_null_function(&self) -> &'static str {
        "COALESCE"
    }

    fn having_sees_select_aliases(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn quote_value(&self, value: &Value) -> String {
        match value {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(v) => i64::from(*v).to_string(),
            Value::Null => "NULL".into(),
            Value::String(v) => {
                let mut out = String::with_capacity(v.len() + 2);
                out.push('\'');
                for ch in v.chars() {
                    match ch {
                        '\0' => out.push_str(r"\0"),
                        '\n' => out.push_str(r"\n"),
                        '\r' => out.push_str(r"\r"),
                        '\x1a' => out.push_str(r"\Z"),
                        '\\' | '\'' | '"' => {
                            out.push('\\');
                            out.push(ch);
                        }
                        _ => out.push(ch),
                    }
                }
                out.push('\'');
                out
            }
        }
    }

    fn if_null_function(&self) -> &'static str {
        "IFNULL"
    }

    fn having_sees_select_aliases(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

/// Dialect selector for configuration surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    MySql,
    Postgres,
}

impl SqlDialect {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            SqlDialect::MySql => &MySql,
            SqlDialect::Postgres => &Postgres,
        }
    }

    /// An owned handle for components that keep their dialect.
    pub fn shared(&self) -> Arc<dyn Dialect> {
        match self {
            SqlDialect::MySql => Arc::new(MySql),
            SqlDialect::Postgres => Arc::new(Postgres),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::MySql),
            "pg" | "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            other => Err(format!("Unsupported SQL dialect: {other}")),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dialect().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_qualified() {
        assert_eq!(
            MySql.quote_qualified("price_index.min_price"),
            "`price_index`.`min_price`"
        );
        assert_eq!(Postgres.quote_qualified("e.entity_id"), r#""e"."entity_id""#);
    }

    #[test]
    fn test_mysql_string_escaping() {
        assert_eq!(MySql.quote_value(&Value::from("red")), "'red'");
        assert_eq!(MySql.quote_value(&Value::from("O'Neil")), r"'O\'Neil'");
        assert_eq!(MySql.quote_value(&Value::from(r"a\b")), r"'a\\b'");
        assert_eq!(MySql.quote_value(&Value::Int(42)), "42");
        assert_eq!(MySql.quote_value(&Value::Boolean(true)), "1");
    }

    #[test]
    fn test_postgres_string_escaping() {
        assert_eq!(Postgres.quote_value(&Value::from("O'Neil")), "'O''Neil'");
        assert_eq!(Postgres.quote_value(&Value::Boolean(false)), "FALSE");
        assert_eq!(Postgres.quote_value(&Value::Null), "NULL");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("MySQL".parse::<SqlDialect>(), Ok(SqlDialect::MySql));
        assert_eq!("pg".parse::<SqlDialect>(), Ok(SqlDialect::Postgres));
        assert!("oracle".parse::<SqlDialect>().is_err());
        assert_eq!(SqlDialect::Postgres.dialect().if_null_function(), "COALESCE");
    }
}
