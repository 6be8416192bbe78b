//! Application layer for scribe
//!
//! This crate contains the workflow facade, document operations and the port
//! definitions that infrastructure adapters implement. It depends only on the
//! domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    ai_provider::{AiProvider, ProviderError},
    document_store::DocumentStore,
    user_store::{StoreError, UserStore},
    workflow_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowLogger},
};
pub use use_cases::documents::{DocumentError, DocumentService};
pub use use_cases::workflow_facade::WorkflowFacade;
