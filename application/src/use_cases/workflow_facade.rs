//! Workflow facade.
//!
//! The single orchestration entry point used by the transport. It composes the
//! AI provider, the user store and document operations into four workflows.
//!
//! The facade is the error boundary: every failure below it (including a
//! panicking adapter) is converted into a tagged error result. None of the
//! public workflow methods return `Err` or unwind.

use crate::ports::ai_provider::{AiProvider, ProviderError};
use crate::ports::document_store::DocumentStore;
use crate::ports::user_store::{StoreError, UserStore};
use crate::ports::workflow_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowLogger};
use crate::use_cases::documents::DocumentService;
use futures::FutureExt;
use scribe_domain::{
    AnswerResult, AuthenticationResult, CompletionResult, Credentials, DocumentRef, DomainError,
    ErrorKind, NewUser, Question, RegistrationResult, WorkflowError, WorkflowRequest,
    WorkflowResponse, preview,
};
use serde_json::json;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates the question-answering, completion and account workflows.
///
/// Construct once at startup and share it (it is cheap to clone). The AI
/// provider handle is created by the caller and reused for every request.
#[derive(Clone)]
pub struct WorkflowFacade {
    provider: Arc<dyn AiProvider>,
    users: Arc<dyn UserStore>,
    documents: DocumentService,
    workflow_logger: Arc<dyn WorkflowLogger>,
}

impl WorkflowFacade {
    pub fn new(
        provider: Arc<dyn AiProvider>,
        users: Arc<dyn UserStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            provider,
            users,
            documents: DocumentService::new(documents),
            workflow_logger: Arc::new(NoWorkflowLogger),
        }
    }

    /// Create with a workflow audit logger.
    pub fn with_workflow_logger(mut self, logger: Arc<dyn WorkflowLogger>) -> Self {
        self.workflow_logger = logger;
        self
    }

    /// Document operations sharing this facade's persistence backend.
    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    /// Name of the AI provider in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Answer `question`, grounded in `document_refs` when any are given.
    ///
    /// Non-empty references go to `answer_with_context`; otherwise the plain
    /// `answer` is used. Exactly one provider call is made. A blank question
    /// is rejected as invalid input and never reaches the provider.
    pub async fn process_question_with_documents(
        &self,
        question: &str,
        document_refs: &[DocumentRef],
    ) -> AnswerResult {
        info!(
            "Question workflow ({} documents): {}",
            document_refs.len(),
            preview(question, 100)
        );

        let outcome = match Question::try_new(question) {
            Err(e) => Err(input_failure(e)),
            Ok(question) => {
                let provider = self.provider.as_ref();
                contain(async move {
                    let answer = if document_refs.is_empty() {
                        provider.answer(question.content()).await
                    } else {
                        provider
                            .answer_with_context(question.content(), document_refs)
                            .await
                    };
                    answer.map_err(provider_failure)
                })
                .await
            }
        };

        match outcome {
            Ok(response) => {
                debug!("Question answered ({} bytes)", response.len());
                self.workflow_logger.log(WorkflowEvent::new(
                    "question_answered",
                    json!({
                        "provider": self.provider.name(),
                        "documents": document_refs.len(),
                        "bytes": response.len(),
                    }),
                ));
                AnswerResult::answered(question, response)
            }
            Err(error) => {
                warn!("Question workflow failed: {}", error);
                self.log_failure("question_failed", &error);
                AnswerResult::failed(question, error)
            }
        }
    }

    /// Extend a partial title or paragraph.
    ///
    /// Blank text is rejected as invalid input and never reaches the provider.
    pub async fn complete_user_workflow(&self, text: &str) -> CompletionResult {
        info!("Completion workflow: {}", preview(text, 100));

        let outcome = if text.trim().is_empty() {
            Err(input_failure(DomainError::EmptyText))
        } else {
            let provider = self.provider.as_ref();
            contain(async move { provider.complete(text).await.map_err(provider_failure) }).await
        };

        match outcome {
            Ok(completion) => {
                self.workflow_logger.log(WorkflowEvent::new(
                    "text_completed",
                    json!({
                        "provider": self.provider.name(),
                        "input_bytes": text.len(),
                        "bytes": completion.len(),
                    }),
                ));
                CompletionResult::completed(text, completion)
            }
            Err(error) => {
                warn!("Completion workflow failed: {}", error);
                self.log_failure("completion_failed", &error);
                CompletionResult::failed(text, error)
            }
        }
    }

    /// Log in through the persistence backend.
    ///
    /// Bad credentials and backend failures produce the same result shape;
    /// only `error_kind` tells them apart.
    pub async fn authenticate_and_get_profile(
        &self,
        email: &str,
        password: &str,
    ) -> AuthenticationResult {
        info!("Authentication workflow for {}", email);
        let credentials = Credentials::new(email, password);
        let users = self.users.as_ref();

        let outcome = contain(async move {
            users.login_user(&credentials).await.map_err(|e| match e {
                StoreError::Rejected(message) => {
                    WorkflowError::new(ErrorKind::Unauthorized, message)
                }
                other => store_failure(other),
            })
        })
        .await;

        match outcome {
            Ok(profile) => {
                self.workflow_logger.log(WorkflowEvent::new(
                    "login_succeeded",
                    json!({ "email": email, "user_id": profile.id }),
                ));
                AuthenticationResult::authenticated(profile)
            }
            Err(error) => {
                warn!("Authentication failed for {}: {}", email, error);
                self.workflow_logger.log(WorkflowEvent::new(
                    "login_failed",
                    json!({ "email": email, "error_kind": error.kind }),
                ));
                AuthenticationResult::failed(error)
            }
        }
    }

    /// Create an account through the persistence backend.
    pub async fn register_new_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> RegistrationResult {
        info!("Registration workflow for {}", email);
        let user = NewUser::new(name, email, password);
        let users = self.users.as_ref();

        let outcome =
            contain(async move { users.register_user(&user).await.map_err(store_failure) }).await;

        match outcome {
            Ok(profile) => {
                self.workflow_logger.log(WorkflowEvent::new(
                    "user_registered",
                    json!({ "email": email, "user_id": profile.id }),
                ));
                RegistrationResult::registered(profile)
            }
            Err(error) => {
                warn!("Registration failed for {}: {}", email, error);
                self.workflow_logger.log(WorkflowEvent::new(
                    "registration_failed",
                    json!({ "email": email, "error_kind": error.kind }),
                ));
                RegistrationResult::failed(error)
            }
        }
    }

    /// Route a decoded request to its workflow.
    pub async fn dispatch(&self, request: WorkflowRequest) -> WorkflowResponse {
        debug!("Dispatching {:?}", request);
        match request {
            WorkflowRequest::QuestionAnswer {
                question,
                document_refs,
            } => WorkflowResponse::Answer(
                self.process_question_with_documents(&question, &document_refs)
                    .await,
            ),
            WorkflowRequest::TextCompletion { text } => {
                WorkflowResponse::Completion(self.complete_user_workflow(&text).await)
            }
            WorkflowRequest::Register {
                name,
                email,
                password,
            } => WorkflowResponse::Registration(
                self.register_new_user(&name, &email, &password).await,
            ),
            WorkflowRequest::Authenticate { email, password } => WorkflowResponse::Authentication(
                self.authenticate_and_get_profile(&email, &password).await,
            ),
        }
    }

    fn log_failure(&self, event_type: &'static str, error: &WorkflowError) {
        self.workflow_logger.log(WorkflowEvent::new(
            event_type,
            json!({
                "provider": self.provider.name(),
                "error_kind": error.kind,
                "error": error.message,
            }),
        ));
    }
}

/// Run a backend call, turning a panic into an `Internal` failure.
async fn contain<T, F>(call: F) -> Result<T, WorkflowError>
where
    F: Future<Output = Result<T, WorkflowError>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err(WorkflowError::new(
            ErrorKind::Internal,
            "backend call panicked",
        )),
    }
}

fn provider_failure(e: ProviderError) -> WorkflowError {
    WorkflowError::new(e.kind(), e.to_string())
}

fn store_failure(e: StoreError) -> WorkflowError {
    WorkflowError::new(e.kind(), e.to_string())
}

fn input_failure(e: DomainError) -> WorkflowError {
    WorkflowError::new(ErrorKind::InvalidInput, e.to_string())
}
