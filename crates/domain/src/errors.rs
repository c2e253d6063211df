//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Query was missing or blank after trimming
    #[error("Query must be a non-empty string")]
    EmptyQuery,

    /// A string did not name a member of the verdict set
    #[error("Not a valid verdict: {0}")]
    InvalidVerdict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_error_message() {
        let err = DomainError::EmptyQuery;
        assert_eq!(err.to_string(), "Query must be a non-empty string");
    }

    #[test]
    fn invalid_verdict_error_message() {
        let err = DomainError::InvalidVerdict("maybe".to_string());
        assert_eq!(err.to_string(), "Not a valid verdict: maybe");
    }
}
