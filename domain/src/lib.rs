//! Domain layer for scribe
//!
//! This crate contains the entities, value objects and result shapes shared
//! by every other layer. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Workflows
//!
//! The service exposes four workflows (question answering, text completion,
//! registration, authentication). Each answers with a tagged
//! [`WorkflowResult`]: a success payload or an error payload carrying an
//! [`ErrorKind`], never both.
//!
//! ## Documents
//!
//! Short text [`Document`]s are owned by an email address. Grounded answers
//! receive [`DocumentRef`]s, which are URLs or opaque identifiers.

pub mod core;
pub mod document;
pub mod persistence;
pub mod providers;
pub mod user;
pub mod workflow;

// Re-export commonly used types
pub use crate::core::{error::DomainError, question::Question, string::preview};
pub use document::{
    entities::{Document, DocumentId, DocumentList},
    reference::DocumentRef,
};
pub use persistence::{BackendConfig, BackendKind, SupabaseBackendConfig};
pub use providers::{
    DEFAULT_KEY, GEMINI_KEY, GeminiProviderConfig, HttpTimeouts, MOCK_KEY, ProviderConfig,
    ProviderKind,
};
pub use user::{Credentials, NewUser, UserProfile, require_email};
pub use workflow::{
    request::{WorkflowKind, WorkflowRequest, WorkflowResponse},
    result::{
        AnswerFailed, AnswerResult, Answered, Authenticated, AuthenticationFailed,
        AuthenticationResult, COMPLETION_ERROR_PREFIX, Completed, CompletionFailed,
        CompletionResult, ErrorKind, FailurePayload, QUESTION_ERROR_PREFIX, Registered,
        RegistrationFailed, RegistrationResult, WorkflowError, WorkflowResult,
    },
};
