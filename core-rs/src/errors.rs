//! Error types for the taxonomy engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    #[error("No token schema for platform: {0}")]
    PlatformNotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<regex::Error> for TaxonError {
    fn from(err: regex::Error) -> Self {
        TaxonError::MalformedSchema(format!("invalid format pattern: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, TaxonError>;
