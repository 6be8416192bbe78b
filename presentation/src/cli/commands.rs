//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use scribe_domain::{BackendKind, DocumentId, DocumentRef, WorkflowRequest};
use std::path::PathBuf;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when attached to a terminal
    #[default]
    Text,
    /// The tagged result object as JSON
    Json,
}

/// Persistence backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    Supabase,
    Memory,
}

impl From<BackendChoice> for BackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Supabase => BackendKind::Supabase,
            BackendChoice::Memory => BackendKind::Memory,
        }
    }
}

/// CLI arguments for scribe
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(author, version, about = "Document-grounded AI assistant")]
#[command(long_about = r#"
Scribe answers questions grounded in your documents, autocompletes text,
and manages accounts and stored documents.

Configuration files are loaded from (later wins):
1. ~/.config/scribe/config.toml   Global config
2. ./scribe.toml                  Project-level config
3. --config <path>                Explicit config file
4. SCRIBE_* environment variables (e.g. SCRIBE_PROVIDERS__DEFAULT=mock)

Example:
  scribe ask "What does the contract say about renewals?" --doc https://example.com/contract.pdf
  scribe complete "Once upon a time"
  scribe --backend memory --provider mock ask "hello"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// AI provider key (gemini, mock); unknown keys fall back to the default
    #[arg(long, global = true, value_name = "KEY")]
    pub provider: Option<String>,

    /// Persistence backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostics to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a question, optionally grounded in documents
    Ask {
        question: String,

        /// Document reference (URL or identifier); repeatable
        #[arg(short, long = "doc", value_name = "REF")]
        docs: Vec<String>,
    },

    /// Continue a piece of text
    Complete { text: String },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and print the profile
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Manage stored documents
    Docs {
        #[command(subcommand)]
        action: DocsCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DocsCommand {
    /// Store a new document
    Create {
        content: String,
        /// Owner email
        #[arg(long)]
        email: String,
    },
    /// List the owner's documents
    List {
        #[arg(long)]
        email: String,
    },
    Get {
        id: DocumentId,
        #[arg(long)]
        email: String,
    },
    /// Replace a document's content
    Update {
        id: DocumentId,
        content: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        id: DocumentId,
        #[arg(long)]
        email: String,
    },
}

impl Command {
    /// The facade workflow this command runs, `None` for document commands.
    pub fn to_request(&self) -> Option<WorkflowRequest> {
        match self {
            Command::Ask { question, docs } => Some(WorkflowRequest::QuestionAnswer {
                question: question.clone(),
                document_refs: DocumentRef::parse_all(docs.iter().map(String::as_str)),
            }),
            Command::Complete { text } => Some(WorkflowRequest::TextCompletion { text: text.clone() }),
            Command::Register {
                name,
                email,
                password,
            } => Some(WorkflowRequest::Register {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
            }),
            Command::Login { email, password } => Some(WorkflowRequest::Authenticate {
                email: email.clone(),
                password: password.clone(),
            }),
            Command::Docs { .. } => None,
        }
    }
}
