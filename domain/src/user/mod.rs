//! User identities as seen by the authentication workflows.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile returned by the persistence backend on register/login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Backend-issued token; the core never inspects it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Login credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration input
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub credentials: Credentials,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: Credentials::new(email, password),
        }
    }

    pub fn email(&self) -> &str {
        &self.credentials.email
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Validate an owner email, returning it trimmed
///
/// Only rejects blank input; format checks belong to the transport layer.
pub fn require_email(email: &str) -> Result<&str, DomainError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        Err(DomainError::InvalidEmail(email.to_string()))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let user = NewUser::new("Ana", "ana@example.com", "hunter2");
        let dbg = format!("{:?}", user);
        assert!(dbg.contains("ana@example.com"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn test_require_email() {
        assert_eq!(require_email("  a@x.com ").unwrap(), "a@x.com");
        assert!(matches!(
            require_email("   "),
            Err(DomainError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_profile_optional_fields_skipped() {
        let profile = UserProfile {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            name: None,
            access_token: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("access_token").is_none());
    }
}
