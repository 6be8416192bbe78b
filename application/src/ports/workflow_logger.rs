//! Port for structured workflow logging.
//!
//! Defines the [`WorkflowLogger`] trait for recording one event per workflow
//! outcome to a machine-readable audit trail (JSONL). `tracing` covers the
//! human-readable diagnostics; this port covers the audit record.
//!
//! Payloads must never contain passwords or access tokens.

use serde_json::Value;

/// A structured workflow event.
pub struct WorkflowEvent {
    /// Event type identifier (e.g., "question_answered", "login_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl WorkflowEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging workflow events.
///
/// `log` is synchronous and infallible: a broken audit sink must not turn a
/// successful workflow into a failed one.
pub trait WorkflowLogger: Send + Sync {
    fn log(&self, event: WorkflowEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoWorkflowLogger;

impl WorkflowLogger for NoWorkflowLogger {
    fn log(&self, _event: WorkflowEvent) {}
}
