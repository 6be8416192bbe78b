//! Tagged workflow results

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix embedded in `response` when question answering fails
pub const QUESTION_ERROR_PREFIX: &str = "Error procesando la pregunta: ";

/// Prefix embedded in `completion` when text completion fails
pub const COMPLETION_ERROR_PREFIX: &str = "Error en autocompletado: ";

/// Category of a workflow failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Backend unreachable (DNS, connection refused, TLS, ...)
    Network,
    /// Backend did not answer in time
    Timeout,
    /// Caller-supplied input was rejected before or by the backend
    InvalidInput,
    /// Backend refused the credentials
    Unauthorized,
    /// Backend answered with an error of its own
    Backend,
    /// Anything else, including malformed backend responses
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Backend => "backend",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic half of an error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowError {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(rename = "error_kind")]
    pub kind: ErrorKind,
}

impl WorkflowError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Implemented by every error payload so callers can reach the
/// [`WorkflowError`] without matching on the workflow.
pub trait FailurePayload {
    fn workflow_error(&self) -> &WorkflowError;
}

/// Success or error, discriminated by a `status` field when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WorkflowResult<S, E> {
    Success(S),
    Error(E),
}

impl<S, E: FailurePayload> WorkflowResult<S, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::Success(_))
    }

    /// `"success"` or `"error"`, matching the serialized tag
    pub fn status(&self) -> &'static str {
        match self {
            WorkflowResult::Success(_) => "success",
            WorkflowResult::Error(_) => "error",
        }
    }

    pub fn success(&self) -> Option<&S> {
        match self {
            WorkflowResult::Success(s) => Some(s),
            WorkflowResult::Error(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            WorkflowResult::Success(_) => None,
            WorkflowResult::Error(e) => Some(e),
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.failure().map(FailurePayload::workflow_error)
    }
}

// ==================== Question answering ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answered {
    pub question: String,
    pub response: String,
}

/// `response` keeps the legacy prefixed message for existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFailed {
    pub question: String,
    pub response: String,
    #[serde(flatten)]
    pub error: WorkflowError,
}

impl FailurePayload for AnswerFailed {
    fn workflow_error(&self) -> &WorkflowError {
        &self.error
    }
}

pub type AnswerResult = WorkflowResult<Answered, AnswerFailed>;

impl WorkflowResult<Answered, AnswerFailed> {
    pub fn answered(question: impl Into<String>, response: impl Into<String>) -> Self {
        WorkflowResult::Success(Answered {
            question: question.into(),
            response: response.into(),
        })
    }

    pub fn failed(question: impl Into<String>, error: WorkflowError) -> Self {
        WorkflowResult::Error(AnswerFailed {
            question: question.into(),
            response: format!("{}{}", QUESTION_ERROR_PREFIX, error.message),
            error,
        })
    }
}

// ==================== Text completion ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completed {
    pub original_text: String,
    pub completion: String,
}

/// `completion` keeps the legacy prefixed message for existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionFailed {
    pub original_text: String,
    pub completion: String,
    #[serde(flatten)]
    pub error: WorkflowError,
}

impl FailurePayload for CompletionFailed {
    fn workflow_error(&self) -> &WorkflowError {
        &self.error
    }
}

pub type CompletionResult = WorkflowResult<Completed, CompletionFailed>;

impl WorkflowResult<Completed, CompletionFailed> {
    pub fn completed(original_text: impl Into<String>, completion: impl Into<String>) -> Self {
        WorkflowResult::Success(Completed {
            original_text: original_text.into(),
            completion: completion.into(),
        })
    }

    pub fn failed(original_text: impl Into<String>, error: WorkflowError) -> Self {
        WorkflowResult::Error(CompletionFailed {
            original_text: original_text.into(),
            completion: format!("{}{}", COMPLETION_ERROR_PREFIX, error.message),
            error,
        })
    }
}

// ==================== Authentication ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authenticated {
    pub authenticated: bool,
    pub user_data: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationFailed {
    pub authenticated: bool,
    #[serde(flatten)]
    pub error: WorkflowError,
}

impl FailurePayload for AuthenticationFailed {
    fn workflow_error(&self) -> &WorkflowError {
        &self.error
    }
}

pub type AuthenticationResult = WorkflowResult<Authenticated, AuthenticationFailed>;

impl WorkflowResult<Authenticated, AuthenticationFailed> {
    pub fn authenticated(user_data: UserProfile) -> Self {
        WorkflowResult::Success(Authenticated {
            authenticated: true,
            user_data,
        })
    }

    pub fn failed(error: WorkflowError) -> Self {
        WorkflowResult::Error(AuthenticationFailed {
            authenticated: false,
            error,
        })
    }
}

// ==================== Registration ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registered {
    pub registered: bool,
    pub user_data: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationFailed {
    pub registered: bool,
    #[serde(flatten)]
    pub error: WorkflowError,
}

impl FailurePayload for RegistrationFailed {
    fn workflow_error(&self) -> &WorkflowError {
        &self.error
    }
}

pub type RegistrationResult = WorkflowResult<Registered, RegistrationFailed>;

impl WorkflowResult<Registered, RegistrationFailed> {
    pub fn registered(user_data: UserProfile) -> Self {
        WorkflowResult::Success(Registered {
            registered: true,
            user_data,
        })
    }

    pub fn failed(error: WorkflowError) -> Self {
        WorkflowResult::Error(RegistrationFailed {
            registered: false,
            error,
        })
    }
}
