//! Typed workflow requests

use super::result::{
    AnswerResult, AuthenticationResult, CompletionResult, RegistrationResult, WorkflowError,
};
use crate::document::reference::DocumentRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four workflows the facade exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    QuestionAnswer,
    TextCompletion,
    Register,
    Authenticate,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::QuestionAnswer => "question_answer",
            WorkflowKind::TextCompletion => "text_completion",
            WorkflowKind::Register => "register",
            WorkflowKind::Authenticate => "authenticate",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for one workflow, as decoded by the transport
///
/// Serialized as `{"operation": ..., "payload": {...}}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "payload", rename_all = "snake_case")]
pub enum WorkflowRequest {
    QuestionAnswer {
        question: String,
        #[serde(default)]
        document_refs: Vec<DocumentRef>,
    },
    TextCompletion {
        text: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Authenticate {
        email: String,
        password: String,
    },
}

impl WorkflowRequest {
    pub fn kind(&self) -> WorkflowKind {
        match self {
            WorkflowRequest::QuestionAnswer { .. } => WorkflowKind::QuestionAnswer,
            WorkflowRequest::TextCompletion { .. } => WorkflowKind::TextCompletion,
            WorkflowRequest::Register { .. } => WorkflowKind::Register,
            WorkflowRequest::Authenticate { .. } => WorkflowKind::Authenticate,
        }
    }
}

impl fmt::Debug for WorkflowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowRequest::QuestionAnswer {
                question,
                document_refs,
            } => f
                .debug_struct("QuestionAnswer")
                .field("question", question)
                .field("document_refs", document_refs)
                .finish(),
            WorkflowRequest::TextCompletion { text } => f
                .debug_struct("TextCompletion")
                .field("text", text)
                .finish(),
            WorkflowRequest::Register { name, email, .. } => f
                .debug_struct("Register")
                .field("name", name)
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            WorkflowRequest::Authenticate { email, .. } => f
                .debug_struct("Authenticate")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Result of [`WorkflowRequest`] dispatch, one variant per workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WorkflowResponse {
    Answer(AnswerResult),
    Completion(CompletionResult),
    Registration(RegistrationResult),
    Authentication(AuthenticationResult),
}

impl WorkflowResponse {
    pub fn kind(&self) -> WorkflowKind {
        match self {
            WorkflowResponse::Answer(_) => WorkflowKind::QuestionAnswer,
            WorkflowResponse::Completion(_) => WorkflowKind::TextCompletion,
            WorkflowResponse::Registration(_) => WorkflowKind::Register,
            WorkflowResponse::Authentication(_) => WorkflowKind::Authenticate,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowResponse::Answer(r) => r.error(),
            WorkflowResponse::Completion(r) => r.error(),
            WorkflowResponse::Registration(r) => r.error(),
            WorkflowResponse::Authentication(r) => r.error(),
        }
    }
}
