//! Infrastructure layer for scribe
//!
//! Adapters implementing the application ports: AI providers, persistence
//! backends, the workflow audit log, and configuration file loading.

pub mod config;
mod http;
pub mod logging;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlWorkflowLogger;
pub use persistence::{InMemoryBackend, SupabaseBackend, SupabaseSetupError};
pub use providers::{GeminiProvider, MockProvider, ProviderConstructor, ProviderRegistry};
