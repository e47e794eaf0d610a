//! Custom error types for indexctl

use thiserror::Error;

/// Main error type for indexctl operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider '{0}' is not available on this platform")]
    ProviderUnavailable(String),

    #[error("Index mode '{mode}' is not supported by provider '{provider}'")]
    InvalidMode { provider: String, mode: String },

    #[error("Please select an embedding file")]
    MissingArtifact,

    #[error("Indexing failed: {0}")]
    Indexing(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for indexctl
pub type Result<T> = std::result::Result<T, Error>;
