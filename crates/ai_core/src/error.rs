//! Generation errors

use thiserror::Error;

/// Errors that can occur while calling the generation service
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API credential was configured
    #[error("Generation API key is missing")]
    MissingCredential,

    /// Failed to connect to the generation service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the generation service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Timeout waiting for the generation service
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    /// Service answered with a non-success status
    #[error("Server error (status {status}): {body}")]
    ServerError { status: u16, body: String },

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response parsed but carried no generated text
    #[error("Response contained no candidates")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout(30000)
        } else if err.is_connect() {
            GenerationError::ConnectionFailed(err.to_string())
        } else {
            GenerationError::RequestFailed(err.to_string())
        }
    }
}
