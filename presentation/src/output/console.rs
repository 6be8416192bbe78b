//! Console output formatter

use super::formatter::OutputFormatter;
use super::status::{document_status, http_status};
use colored::Colorize;
use scribe_application::DocumentError;
use scribe_domain::{
    Document, DocumentList, UserProfile, WorkflowError, WorkflowResponse, WorkflowResult, preview,
};

/// Formats results for a human at the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(response: &WorkflowResponse) -> String {
        if let Some(error) = response.error() {
            return Self::error_line(http_status(response), error);
        }
        match response {
            WorkflowResponse::Answer(WorkflowResult::Success(answer)) => format!(
                "{} {}\n\n{}\n",
                "Q:".cyan().bold(),
                answer.question,
                answer.response
            ),
            WorkflowResponse::Completion(WorkflowResult::Success(completed)) => {
                format!("{}\n", completed.completion)
            }
            WorkflowResponse::Registration(WorkflowResult::Success(registered)) => {
                Self::profile("Registered", &registered.user_data)
            }
            WorkflowResponse::Authentication(WorkflowResult::Success(authenticated)) => {
                Self::profile("Authenticated", &authenticated.user_data)
            }
            // Error variants were handled above
            _ => String::new(),
        }
    }

    fn error_line(status: u16, error: &WorkflowError) -> String {
        format!(
            "{} {}\n",
            format!("Error [{} {}]:", status, error.kind).red().bold(),
            error.message
        )
    }

    fn profile(title: &str, user: &UserProfile) -> String {
        let mut output = format!("{}\n", title.green().bold());
        output.push_str(&format!("  {} {}\n", "id:".dimmed(), user.id));
        output.push_str(&format!("  {} {}\n", "email:".dimmed(), user.email));
        if let Some(name) = &user.name {
            output.push_str(&format!("  {} {}\n", "name:".dimmed(), name));
        }
        output
    }

    fn document_summary(document: &Document) -> String {
        format!(
            "{} {}",
            format!("#{}", document.id).yellow().bold(),
            preview(&document.content.replace('\n', " "), 60)
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &WorkflowResponse) -> String {
        Self::format(response)
    }

    fn format_document(&self, document: &Document) -> String {
        let mut output = format!(
            "{} {}\n",
            format!("#{}", document.id).yellow().bold(),
            document.email.dimmed()
        );
        if let Some(updated) = document.updated_at.or(document.created_at) {
            output.push_str(&format!("{}\n", updated.to_rfc3339().dimmed()));
        }
        output.push('\n');
        output.push_str(&document.content);
        output.push('\n');
        output
    }

    fn format_documents(&self, documents: &DocumentList) -> String {
        let mut output = format!("{} {}\n", "Documents:".cyan().bold(), documents.count);
        for document in &documents.documents {
            output.push_str(&format!("  {}\n", Self::document_summary(document)));
        }
        output
    }

    fn format_document_error(&self, error: &DocumentError) -> String {
        format!(
            "{} {}\n",
            format!("Error [{} {}]:", document_status(error), error.kind()).red().bold(),
            error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{
        AnswerResult, AuthenticationResult, CompletionResult, ErrorKind,
    };

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_answer_shows_question_and_response() {
        plain();
        let out = ConsoleFormatter::format(&WorkflowResponse::Answer(AnswerResult::answered(
            "¿Qué?",
            "Esto.",
        )));
        assert_eq!(out, "Q: ¿Qué?\n\nEsto.\n");
    }

    #[test]
    fn test_completion_prints_text_only() {
        plain();
        let out = ConsoleFormatter::format(&WorkflowResponse::Completion(
            CompletionResult::completed("Hola", "Hola mundo"),
        ));
        assert_eq!(out, "Hola mundo\n");
    }

    #[test]
    fn test_error_shows_status_and_kind() {
        plain();
        let out = ConsoleFormatter::format(&WorkflowResponse::Authentication(
            AuthenticationResult::failed(WorkflowError::new(
                ErrorKind::Unauthorized,
                "Invalid login credentials",
            )),
        ));
        assert_eq!(out, "Error [401 unauthorized]: Invalid login credentials\n");
    }

    #[test]
    fn test_profile_never_prints_token() {
        plain();
        let out = ConsoleFormatter::format(&WorkflowResponse::Authentication(
            AuthenticationResult::authenticated(UserProfile {
                id: "u-1".to_string(),
                email: "a@x.com".to_string(),
                name: Some("Ana".to_string()),
                access_token: Some("secret-jwt".to_string()),
            }),
        ));
        assert!(out.contains("a@x.com"));
        assert!(out.contains("Ana"));
        assert!(!out.contains("secret-jwt"));
    }

    #[test]
    fn test_document_list() {
        plain();
        let list = DocumentList::from(vec![Document {
            id: 4,
            email: "a@x.com".to_string(),
            content: "línea uno\nlínea dos".to_string(),
            created_at: None,
            updated_at: None,
        }]);
        let out = ConsoleFormatter.format_documents(&list);
        assert_eq!(out, "Documents: 1\n  #4 línea uno línea dos\n");
    }
}
