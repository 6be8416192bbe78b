//! Output formatter trait

use scribe_application::DocumentError;
use scribe_domain::{Document, DocumentList, WorkflowResponse};

/// Renders workflow and document results for the terminal
pub trait OutputFormatter {
    fn format_response(&self, response: &WorkflowResponse) -> String;

    fn format_document(&self, document: &Document) -> String;

    fn format_documents(&self, documents: &DocumentList) -> String;

    fn format_document_error(&self, error: &DocumentError) -> String;
}
