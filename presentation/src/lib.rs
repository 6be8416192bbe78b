//! Presentation layer for scribe
//!
//! This crate contains the CLI definitions, output formatters and the
//! mapping from workflow results to transport status codes.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{BackendChoice, Cli, Command, DocsCommand, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use output::status::{document_status, exit_code, http_status};

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
