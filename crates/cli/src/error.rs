use planner::filter::error::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the catalog file: {0}")]
    CatalogFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the catalog file as JSON: {0}")]
    CatalogDeserialize(#[from] serde_json::Error),

    #[error("Failed to compile the filter: {0}")]
    Compile(#[from] CompileError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
