//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
///
/// Every variant is fatal: configuration is all-or-nothing and there is no
/// partial mode to fall back to.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Config validation error: {0}")]
    Validation(String),

    #[error(r#"Collection `{name}` has invalid type `{kind}`. Must be "md" or "vue"."#)]
    InvalidCollectionType { name: String, kind: String },
}
