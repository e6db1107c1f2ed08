/*!
 * Error types for the locapipe application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions. Provider errors are
 * always absorbed by the translation fallback; document and file errors are
 * absorbed at document granularity by the controller.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but produced no usable text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// The call did not finish before its deadline
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// The locale is not one the pipeline supports
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Errors raised while decoding a content document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The metadata block is malformed
    #[error("Malformed frontmatter: {0}")]
    Format(String),

    /// The frontmatter could not be written back out
    #[error("Failed to serialize frontmatter: {0}")]
    Serialize(String),
}

impl From<serde_yaml::Error> for DocumentError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Format(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
