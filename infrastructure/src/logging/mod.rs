//! Workflow audit trail.
//!
//! [`JsonlWorkflowLogger`] implements the
//! [`WorkflowLogger`](scribe_application::WorkflowLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlWorkflowLogger;
