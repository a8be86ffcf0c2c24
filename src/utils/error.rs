// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Heading labels must have exactly two or three numeric components.
    #[error("Invalid heading depth for '{0}': expected 2 or 3 dot-separated components")]
    InvalidDepth(String),

    #[error("Invalid heading label '{0}': components must be non-negative integers")]
    InvalidHeading(String),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O error reading project input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse project manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid date '{0}' (expected dd/mm/YYYY)")]
    Date(String),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status}: {body}")]
    Http { status: reqwest::StatusCode, body: String },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),

    #[error("Missing API key (set OPENAI_API_KEY)")]
    MissingApiKey,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Registry input failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Summarization failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
