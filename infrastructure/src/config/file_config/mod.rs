//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout and convert into the
//! serde-free domain config types.

mod backend;
mod logging;
mod providers;

pub use backend::{FileBackendConfig, FileSupabaseConfig};
pub use logging::FileLoggingConfig;
pub use providers::{FileGeminiConfig, FileProvidersConfig};

use scribe_domain::{GEMINI_KEY, MOCK_KEY, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// AI provider settings
    pub providers: FileProvidersConfig,
    /// Persistence/auth backend settings
    pub backend: FileBackendConfig,
    pub logging: FileLoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Falls back to a default; startup continues.
    Warning,
    /// Startup cannot continue.
    Error,
}

/// A problem found in the loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `backend.kind`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message,
        }
    }

    fn error(field: &str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(key) = &self.providers.default
            && !ProviderKind::from_key(key).1
        {
            issues.push(ConfigIssue::warning(
                "providers.default",
                format!(
                    "unknown provider '{}', falling back to '{}' (valid: {}, {})",
                    key, GEMINI_KEY, GEMINI_KEY, MOCK_KEY
                ),
            ));
        }

        if self.backend.parse_kind().is_none() {
            issues.push(ConfigIssue::warning(
                "backend.kind",
                format!(
                    "unknown backend '{}', falling back to 'supabase' (valid: supabase, memory)",
                    self.backend.kind
                ),
            ));
        }

        for (field, value) in [
            ("providers.gemini.model", &self.providers.gemini.model),
            ("providers.gemini.base_url", &self.providers.gemini.base_url),
            ("providers.gemini.api_key_env", &self.providers.gemini.api_key_env),
            ("backend.supabase.documents_table", &self.backend.supabase.documents_table),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(field, "cannot be empty".to_string()));
            }
        }

        for (field, secs) in [
            (
                "providers.gemini.connect_timeout_secs",
                self.providers.gemini.connect_timeout_secs,
            ),
            (
                "backend.supabase.connect_timeout_secs",
                self.backend.supabase.connect_timeout_secs,
            ),
        ] {
            if secs == 0 {
                issues.push(ConfigIssue::error(field, "cannot be 0".to_string()));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers]
default = "mock"

[providers.gemini]
api_key_env = "MY_GEMINI_KEY"
model = "gemini-2.0-flash"
timeout_secs = 90

[backend]
kind = "memory"

[backend.supabase]
url = "https://abc.supabase.co"

[logging]
workflow_log = "/tmp/scribe.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.default.as_deref(), Some("mock"));
        assert_eq!(config.providers.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.providers.gemini.timeout_secs, 90);
        assert_eq!(config.providers.gemini.connect_timeout_secs, 10);
        assert_eq!(config.backend.kind, "memory");
        assert_eq!(config.backend.supabase.url, "https://abc.supabase.co");
        assert_eq!(
            config.logging.workflow_log.as_deref(),
            Some(std::path::Path::new("/tmp/scribe.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.providers.default.is_none());
        assert_eq!(config.backend.kind, "supabase");
        assert!(config.logging.workflow_log.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_warnings() {
        let config: FileConfig = toml::from_str(
            r#"
[providers]
default = "openai"

[backend]
kind = "postgres"
"#,
        )
        .unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert_eq!(issues[0].field, "providers.default");
        assert_eq!(issues[1].field, "backend.kind");
    }

    #[test]
    fn test_default_alias_is_valid() {
        let mut config = FileConfig::default();
        config.providers.default = Some("DEFAULT".to_string());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_model_is_error() {
        let mut config = FileConfig::default();
        config.providers.gemini.model = "  ".to_string();
        config.backend.supabase.connect_timeout_secs = 0;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
        assert_eq!(issues[0].to_string(), "providers.gemini.model: cannot be empty");
    }
}
