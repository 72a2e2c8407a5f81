use planner::filter::catalog::Catalog;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::CliError;

pub const TABLE_PREFIX_VAR: &str = "FILTERC_TABLE_PREFIX";
pub const STORE_ID_VAR: &str = "FILTERC_STORE_ID";
pub const SHOW_OUT_OF_STOCK_VAR: &str = "FILTERC_SHOW_OUT_OF_STOCK";

/// Environment variable manager that loads from system and .env files
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Load variables from a .env file. File entries win over the process
    /// environment.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Applies `FILTERC_*` overrides on top of the catalog file settings.
    pub fn apply_overrides(&self, catalog: &mut Catalog) -> Result<(), CliError> {
        if let Some(prefix) = self.get(TABLE_PREFIX_VAR) {
            info!("Table prefix overridden from environment: {prefix}");
            catalog.table_prefix = prefix.to_string();
        }

        if let Some(raw) = self.get(STORE_ID_VAR) {
            catalog.store_id = raw.trim().parse().map_err(|_| {
                CliError::Config(format!("{STORE_ID_VAR} must be an integer, got '{raw}'"))
            })?;
            info!("Store id overridden from environment: {}", catalog.store_id);
        }

        if let Some(raw) = self.get(SHOW_OUT_OF_STOCK_VAR) {
            let flag = parse_flag(raw).ok_or_else(|| {
                CliError::Config(format!("{SHOW_OUT_OF_STOCK_VAR} must be a boolean, got '{raw}'"))
            })?;
            catalog.flags.insert(
                model::catalog::scope::XML_PATH_SHOW_OUT_OF_STOCK.to_string(),
                flag,
            );
        }

        Ok(())
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse KEY=VALUE format
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();

                if key.is_empty() {
                    return Err(CliError::Config(format!(
                        "Invalid env file: empty key at line {}",
                        line_num + 1
                    )));
                }

                self.vars
                    .insert(key.to_string(), Self::unquote_value(value));
            } else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            }
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::catalog::scope::XML_PATH_SHOW_OUT_OF_STOCK;

    fn empty() -> EnvManager {
        EnvManager {
            vars: HashMap::new(),
        }
    }

    #[test]
    fn test_parse_basic_env() {
        let mut env = empty();
        let content = r#"
# Comment
FILTERC_TABLE_PREFIX=m2_
FILTERC_STORE_ID="2"
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get(TABLE_PREFIX_VAR), Some("m2_"));
        assert_eq!(env.get(STORE_ID_VAR), Some("2"));
    }

    #[test]
    fn test_invalid_env_format() {
        let mut env = empty();
        assert!(env.parse_env_content("INVALID LINE WITHOUT EQUALS").is_err());
        assert!(env.parse_env_content("=value").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut env = empty();
        env.parse_env_content(
            "FILTERC_TABLE_PREFIX=shop_\nFILTERC_STORE_ID=5\nFILTERC_SHOW_OUT_OF_STOCK=no",
        )
        .unwrap();

        let mut catalog = Catalog::new();
        env.apply_overrides(&mut catalog).unwrap();

        assert_eq!(catalog.table_prefix, "shop_");
        assert_eq!(catalog.store_id, 5);
        assert_eq!(catalog.flags.get(XML_PATH_SHOW_OUT_OF_STOCK), Some(&false));
    }

    #[test]
    fn test_invalid_store_override() {
        let mut env = empty();
        env.parse_env_content("FILTERC_STORE_ID=default").unwrap();
        assert!(env.apply_overrides(&mut Catalog::new()).is_err());
    }
}
