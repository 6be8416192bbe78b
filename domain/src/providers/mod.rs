//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of AI provider settings without depending
//! on any serialization format. The infrastructure layer converts its TOML
//! representation into them.

use std::fmt;
use std::time::Duration;

/// Registry key of the production Gemini provider
pub const GEMINI_KEY: &str = "gemini";
/// Registry key of the deterministic mock provider
pub const MOCK_KEY: &str = "mock";
/// Registry key resolved when no kind (or an unknown kind) is requested
pub const DEFAULT_KEY: &str = "default";

/// Closed set of built-in AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// Google Gemini `generateContent` API
    #[default]
    Gemini,
    /// Deterministic echo provider for offline runs and tests
    Mock,
}

impl ProviderKind {
    /// Resolve a configuration key, falling back to the default kind.
    ///
    /// Returns the resolved kind and whether the key was recognised, so callers
    /// can log the fallback.
    pub fn from_key(key: &str) -> (Self, bool) {
        match key.trim().to_lowercase().as_str() {
            GEMINI_KEY | "google" => (ProviderKind::Gemini, true),
            MOCK_KEY => (ProviderKind::Mock, true),
            DEFAULT_KEY | "" => (ProviderKind::default(), true),
            _ => (ProviderKind::default(), false),
        }
    }

    /// Registry key for this kind
    pub fn key(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => GEMINI_KEY,
            ProviderKind::Mock => MOCK_KEY,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outbound HTTP limits for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Whole-request deadline; `None` disables it.
    pub request: Option<Duration>,
    pub connect: Duration,
}

impl HttpTimeouts {
    pub fn from_secs(request_secs: u64, connect_secs: u64) -> Self {
        Self {
            // 0 means "no deadline"
            request: (request_secs > 0).then(|| Duration::from_secs(request_secs)),
            connect: Duration::from_secs(connect_secs),
        }
    }
}

/// Top-level provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Provider used by the facade: "gemini" (default) or "mock".
    pub default: Option<String>,
    /// Gemini API settings.
    pub gemini: GeminiProviderConfig,
}

impl ProviderConfig {
    /// The configured kind and whether the configured key was recognised
    pub fn kind(&self) -> (ProviderKind, bool) {
        ProviderKind::from_key(self.default.as_deref().unwrap_or(DEFAULT_KEY))
    }
}

/// Gemini API provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Model name (default: "gemini-1.5-flash").
    pub model: String,
    /// Request limits for generate calls and document downloads.
    pub timeouts: HttpTimeouts,
}

impl GeminiProviderConfig {
    /// Resolve the API key: explicit value first, then the named env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeouts: HttpTimeouts::from_secs(60, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_known() {
        assert_eq!(ProviderKind::from_key("gemini"), (ProviderKind::Gemini, true));
        assert_eq!(ProviderKind::from_key("MOCK"), (ProviderKind::Mock, true));
        assert_eq!(ProviderKind::from_key(" Mock "), (ProviderKind::Mock, true));
        assert_eq!(ProviderKind::from_key("default"), (ProviderKind::Gemini, true));
    }

    #[test]
    fn test_from_key_unknown_falls_back_to_default() {
        assert_eq!(
            ProviderKind::from_key("gemnii"),
            (ProviderKind::default(), false)
        );
        assert_eq!(
            ProviderKind::from_key("openai"),
            (ProviderKind::Gemini, false)
        );
    }

    #[test]
    fn test_key_roundtrip() {
        for kind in [ProviderKind::Gemini, ProviderKind::Mock] {
            assert_eq!(ProviderKind::from_key(kind.key()), (kind, true));
        }
    }

    #[test]
    fn test_config_kind_defaults_to_gemini() {
        let config = ProviderConfig::default();
        assert_eq!(config.kind(), (ProviderKind::Gemini, true));
    }

    #[test]
    fn test_timeouts_zero_disables_request_deadline() {
        let t = HttpTimeouts::from_secs(0, 5);
        assert!(t.request.is_none());
        assert_eq!(t.connect, Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = GeminiProviderConfig {
            api_key: Some("direct".to_string()),
            api_key_env: "SCRIBE_TEST_UNSET_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("direct"));
    }

    #[test]
    fn test_missing_api_key() {
        let config = GeminiProviderConfig {
            api_key_env: "SCRIBE_TEST_UNSET_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
