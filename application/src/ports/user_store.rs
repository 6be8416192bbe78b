//! User store port
//!
//! Registration and login against the persistence/auth backend.

use async_trait::async_trait;
use scribe_domain::{Credentials, ErrorKind, NewUser, UserProfile};
use thiserror::Error;

/// Errors reported by the persistence/auth backend
///
/// Shared by [`UserStore`] and [`DocumentStore`](super::document_store::DocumentStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The backend refused the request (bad credentials, duplicate user, ...)
    #[error("{0}")]
    Rejected(String),

    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Failure category reported to the transport
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Connection(_) => ErrorKind::Network,
            StoreError::Timeout(_) => ErrorKind::Timeout,
            StoreError::Rejected(_) => ErrorKind::InvalidInput,
            StoreError::Backend { .. } => ErrorKind::Backend,
            StoreError::InvalidResponse(_) => ErrorKind::Internal,
        }
    }
}

/// Account operations of the persistence/auth backend
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an account and return its profile
    async fn register_user(&self, user: &NewUser) -> Result<UserProfile, StoreError>;

    /// Verify credentials and return the matching profile
    async fn login_user(&self, credentials: &Credentials) -> Result<UserProfile, StoreError>;
}
