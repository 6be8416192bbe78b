//! AI provider port
//!
//! Defines the three operations every generative backend must support.

use async_trait::async_trait;
use scribe_domain::{DocumentRef, ErrorKind};
use thiserror::Error;

/// Errors that can occur while calling an AI provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Failure category reported to the transport
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Connection(_) => ErrorKind::Network,
            ProviderError::Timeout(_) => ErrorKind::Timeout,
            ProviderError::Api { status: 400, .. } | ProviderError::InvalidInput(_) => {
                ErrorKind::InvalidInput
            }
            ProviderError::Api { .. } => ErrorKind::Backend,
            ProviderError::InvalidResponse(_) | ProviderError::NotConfigured(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Capability contract of a generative backend
///
/// Implementations must be stateless across calls: one handle is shared by
/// every request for the lifetime of the process.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Short name used in logs (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Answer from the model's general knowledge only
    async fn answer(&self, text: &str) -> Result<String, ProviderError>;

    /// Answer grounded in `documents`, in order.
    ///
    /// With an empty `documents` slice this must behave exactly like
    /// [`answer`](AiProvider::answer).
    async fn answer_with_context(
        &self,
        text: &str,
        documents: &[DocumentRef],
    ) -> Result<String, ProviderError>;

    /// Extend a partial title or paragraph with a plausible continuation
    async fn complete(&self, text: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ProviderError::Connection("refused".into()).kind(),
            ErrorKind::Network
        );
        assert_eq!(ProviderError::Timeout("60s".into()).kind(), ErrorKind::Timeout);
        assert_eq!(
            ProviderError::Api {
                status: 400,
                message: "bad".into()
            }
            .kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ProviderError::Api {
                status: 503,
                message: "overloaded".into()
            }
            .kind(),
            ErrorKind::Backend
        );
        assert_eq!(
            ProviderError::NotConfigured("GEMINI_API_KEY".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_error_display() {
        let e = ProviderError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(e.to_string(), "API error 429: quota exceeded");
    }
}
