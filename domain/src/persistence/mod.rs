//! Persistence backend configuration types (serde-free).

use crate::providers::HttpTimeouts;
use std::fmt;

/// Built-in persistence/auth backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Supabase auth + PostgREST
    #[default]
    Supabase,
    /// Process-local maps, for tests and offline runs
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Supabase => write!(f, "supabase"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(BackendKind::Supabase),
            "memory" | "in-memory" | "mem" => Ok(BackendKind::Memory),
            _ => Err(format!("Invalid BackendKind: {}", s)),
        }
    }
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub supabase: SupabaseBackendConfig,
}

/// Supabase project settings.
#[derive(Debug, Clone)]
pub struct SupabaseBackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Environment variable holding the anon/service key (default: "SUPABASE_KEY").
    pub api_key_env: String,
    /// Direct key (prefer the env var).
    pub api_key: Option<String>,
    /// Table holding documents.
    pub documents_table: String,
    pub timeouts: HttpTimeouts,
}

impl SupabaseBackendConfig {
    /// Resolve the API key: explicit value first, then the named env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}

impl Default for SupabaseBackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key_env: "SUPABASE_KEY".to_string(),
            api_key: None,
            documents_table: "documents".to_string(),
            timeouts: HttpTimeouts::from_secs(30, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("supabase".parse::<BackendKind>(), Ok(BackendKind::Supabase));
        assert_eq!("Memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert_eq!("in-memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert!("postgres".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for kind in [BackendKind::Supabase, BackendKind::Memory] {
            assert_eq!(kind.to_string().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_supabase_defaults() {
        let config = SupabaseBackendConfig::default();
        assert_eq!(config.documents_table, "documents");
        assert!(config.url.is_empty());
    }
}
