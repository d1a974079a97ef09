//! Error types for the leafpress core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationError;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for leafpress.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record file could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Record violates the content schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No article is published under the requested slug.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Returned when a slug does not resolve to a published article.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no article found for slug `{slug}`")]
pub struct NotFoundError {
    /// The slug that was looked up.
    pub slug: String,
}

impl NotFoundError {
    /// Create a not-found error for a slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}
