//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Generation/AI error
    #[error("Generation error: {0}")]
    Generation(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::EmptyQuery);
        assert_eq!(err.to_string(), "Query must be a non-empty string");
    }

    #[test]
    fn generation_error_message() {
        let err = ApplicationError::Generation("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Generation error: quota exceeded");
    }

    #[test]
    fn external_service_error_message() {
        let err = ApplicationError::ExternalService("store unreachable".to_string());
        assert_eq!(err.to_string(), "External service error: store unreachable");
    }
}
