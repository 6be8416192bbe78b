//! Transport status mapping
//!
//! Each workflow keeps its historical failure status; the error category
//! refines it where the cause is unambiguous.

use scribe_application::DocumentError;
use scribe_domain::{ErrorKind, WorkflowKind, WorkflowResponse};

pub const STATUS_OK: u16 = 200;

/// Failure status a workflow reports when the cause is not more specific.
pub fn default_error_status(workflow: WorkflowKind) -> u16 {
    match workflow {
        WorkflowKind::Register => 400,
        WorkflowKind::Authenticate => 401,
        WorkflowKind::QuestionAnswer | WorkflowKind::TextCompletion => 500,
    }
}

/// Status implied by the error category alone, if any.
fn refined_status(kind: ErrorKind) -> Option<u16> {
    match kind {
        ErrorKind::Network => Some(502),
        ErrorKind::Timeout => Some(504),
        ErrorKind::InvalidInput => Some(400),
        ErrorKind::Unauthorized => Some(401),
        ErrorKind::Backend | ErrorKind::Internal => None,
    }
}

pub fn error_status(workflow: WorkflowKind, kind: ErrorKind) -> u16 {
    refined_status(kind).unwrap_or_else(|| default_error_status(workflow))
}

/// HTTP-style status for a workflow response.
pub fn http_status(response: &WorkflowResponse) -> u16 {
    match response.error() {
        None => STATUS_OK,
        Some(error) => error_status(response.kind(), error.kind),
    }
}

pub fn document_status(error: &DocumentError) -> u16 {
    match error {
        DocumentError::NotFound(_) => 404,
        _ => refined_status(error.kind()).unwrap_or(500),
    }
}

/// Process exit code: 0 on success, 1 on any error result.
pub fn exit_code(response: &WorkflowResponse) -> u8 {
    if response.is_success() { 0 } else { 1 }
}
