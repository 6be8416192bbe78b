//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be answered by the AI provider (Value Object)
///
/// Guaranteed to contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, rejecting blank input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ))
        } else {
            Ok(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("¿Qué es Rust?").unwrap();
        assert_eq!(q.content(), "¿Qué es Rust?");
        assert_eq!(q.to_string(), "¿Qué es Rust?");
    }

    #[test]
    fn test_blank_question_rejected() {
        assert!(matches!(
            Question::try_new(""),
            Err(DomainError::InvalidQuestion(_))
        ));
        assert!(Question::try_new(" \n\t ").is_err());
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let ok: Question = serde_json::from_str("\"hola\"").unwrap();
        assert_eq!(ok.into_content(), "hola");
        assert!(serde_json::from_str::<Question>("\"  \"").is_err());
    }
}
