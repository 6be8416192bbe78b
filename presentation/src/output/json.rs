//! JSON output: the tagged result objects as the HTTP transport returns them

use super::formatter::OutputFormatter;
use super::status::document_status;
use scribe_application::DocumentError;
use scribe_domain::{Document, DocumentList, WorkflowResponse};
use serde::Serialize;
use serde_json::json;

pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &WorkflowResponse) -> String {
        Self::pretty(response)
    }

    fn format_document(&self, document: &Document) -> String {
        Self::pretty(document)
    }

    fn format_documents(&self, documents: &DocumentList) -> String {
        Self::pretty(documents)
    }

    fn format_document_error(&self, error: &DocumentError) -> String {
        Self::pretty(&json!({
            "detail": error.to_string(),
            "error_kind": error.kind(),
            "status_code": document_status(error),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{AnswerResult, ErrorKind, WorkflowError};
    use serde_json::Value;

    #[test]
    fn test_response_is_tagged_object() {
        let response = WorkflowResponse::Answer(AnswerResult::failed(
            "q",
            WorkflowError::new(ErrorKind::Timeout, "slow"),
        ));
        let value: Value = serde_json::from_str(&JsonFormatter.format_response(&response)).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["question"], "q");
        assert_eq!(value["error"], "slow");
        assert_eq!(value["error_kind"], "timeout");
    }

    #[test]
    fn test_document_error_carries_status() {
        let value: Value =
            serde_json::from_str(&JsonFormatter.format_document_error(&DocumentError::NotFound(9)))
                .unwrap();
        assert_eq!(value["status_code"], 404);
        assert!(value["detail"].as_str().unwrap().contains('9'));
    }
}
