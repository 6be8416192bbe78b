//! Configuration file loading for scribe
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. Built-in defaults
//! 2. Global: `$XDG_CONFIG_HOME/scribe/config.toml`
//! 3. Project root: `./scribe.toml` or `./.scribe.toml`
//! 4. `--config <path>`
//! 5. `SCRIBE_*` environment variables

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileBackendConfig, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileProvidersConfig, FileSupabaseConfig, Severity,
};
pub use loader::ConfigLoader;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("Invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
