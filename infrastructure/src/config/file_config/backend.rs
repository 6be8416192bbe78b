//! Persistence backend configuration from TOML (`[backend]` section)

use scribe_domain::{BackendConfig, BackendKind, HttpTimeouts, SupabaseBackendConfig};
use serde::{Deserialize, Serialize};

/// `[backend]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// "supabase" or "memory"
    pub kind: String,
    pub supabase: FileSupabaseConfig,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default().to_string(),
            supabase: FileSupabaseConfig::default(),
        }
    }
}

impl FileBackendConfig {
    /// Parse `kind`, `None` when it names no known backend.
    pub fn parse_kind(&self) -> Option<BackendKind> {
        self.kind.parse().ok()
    }

    /// Convert to the domain type; an unknown kind falls back to Supabase.
    pub fn to_backend_config(&self) -> BackendConfig {
        BackendConfig {
            kind: self.parse_kind().unwrap_or_default(),
            supabase: self.supabase.to_supabase_config(),
        }
    }
}

/// Supabase project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSupabaseConfig {
    pub url: String,
    /// Environment variable name for the API key (default: "SUPABASE_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    pub documents_table: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for FileSupabaseConfig {
    fn default() -> Self {
        let defaults = SupabaseBackendConfig::default();
        Self {
            url: defaults.url,
            api_key_env: defaults.api_key_env,
            api_key: None,
            documents_table: defaults.documents_table,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl FileSupabaseConfig {
    pub fn to_supabase_config(&self) -> SupabaseBackendConfig {
        SupabaseBackendConfig {
            url: self.url.clone(),
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            documents_table: self.documents_table.clone(),
            timeouts: HttpTimeouts::from_secs(self.timeout_secs, self.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_is_supabase() {
        let config = FileBackendConfig::default().to_backend_config();
        assert_eq!(config.kind, BackendKind::Supabase);
        assert_eq!(config.supabase.timeouts.request, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_deserialize_backend() {
        let config: FileBackendConfig = toml::from_str(
            r#"
kind = "memory"

[supabase]
url = "https://abc.supabase.co"
documents_table = "notes"
"#,
        )
        .unwrap();
        assert_eq!(config.parse_kind(), Some(BackendKind::Memory));
        let domain = config.to_backend_config();
        assert_eq!(domain.supabase.url, "https://abc.supabase.co");
        assert_eq!(domain.supabase.documents_table, "notes");
        assert_eq!(domain.supabase.api_key_env, "SUPABASE_KEY");
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let config = FileBackendConfig {
            kind: "postgres".to_string(),
            ..Default::default()
        };
        assert!(config.parse_kind().is_none());
        assert_eq!(config.to_backend_config().kind, BackendKind::Supabase);
    }
}
