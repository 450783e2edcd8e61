//! Domain error types

use thiserror::Error;

/// Error when a Notion page reference cannot be understood
#[derive(Debug, Clone, Error)]
#[error("Invalid Notion page: \"{input}\". Expected a page URL or a 32-character page id")]
pub struct PageIdParseError {
    pub input: String,
}

/// Error when an invalid provider is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid provider: \"{input}\". Valid providers are: openai, gemini")]
pub struct InvalidProviderError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
