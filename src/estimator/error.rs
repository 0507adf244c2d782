//! Estimation adapter errors.

use thiserror::Error;

/// Errors raised while obtaining an estimate from an AI service.
#[derive(Error, Debug)]
pub enum EstimationError {
    /// API key not found in environment variables or settings.
    #[error(
        "API key not found. Set ANTHROPIC_API_KEY or CLAUDE_API_KEY, or add it to ~/.memo-engine/settings.json"
    )]
    ApiKeyNotFound,

    /// The API answered with a non-success status.
    #[error("Estimation request failed: {0}")]
    ApiRequestFailed(String),

    /// The API response could not be read.
    #[error("Invalid response format from estimation service: {0}")]
    InvalidResponseFormat(String),

    /// The response was well-formed but carried no usable number.
    #[error("Estimation response has no usable estimatedValue: {0}")]
    MissingEstimate(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}
