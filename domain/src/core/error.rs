//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Document content cannot be empty")]
    EmptyContent,

    #[error("Text to complete cannot be empty")]
    EmptyText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::EmptyContent.to_string(),
            "Document content cannot be empty"
        );
        assert_eq!(
            DomainError::InvalidEmail("   ".to_string()).to_string(),
            "Invalid email:    "
        );
    }
}
