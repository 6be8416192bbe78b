//! Provider configuration from TOML (`[providers]` section)

use scribe_domain::{GeminiProviderConfig, HttpTimeouts, ProviderConfig};
use serde::{Deserialize, Serialize};

/// `[providers]` section
///
/// ```toml
/// [providers]
/// default = "gemini"
///
/// [providers.gemini]
/// model = "gemini-1.5-flash"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider selected at startup. Unknown or missing keys fall back to Gemini.
    pub default: Option<String>,
    pub gemini: FileGeminiConfig,
}

impl FileProvidersConfig {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            default: self.default.clone(),
            gemini: self.gemini.to_gemini_config(),
        }
    }
}

/// Google Gemini provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Whole-request deadline; 0 disables it.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        let defaults = GeminiProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: None,
            base_url: defaults.base_url,
            model: defaults.model,
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl FileGeminiConfig {
    pub fn to_gemini_config(&self) -> GeminiProviderConfig {
        GeminiProviderConfig {
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeouts: HttpTimeouts::from_secs(self.timeout_secs, self.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_match_domain() {
        let config = FileProvidersConfig::default().to_provider_config();
        assert!(config.default.is_none());
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.gemini.timeouts.request, Some(Duration::from_secs(60)));
        assert_eq!(config.gemini.timeouts.connect, Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_partial_gemini() {
        let config: FileProvidersConfig = toml::from_str(
            r#"
default = "mock"

[gemini]
model = "gemini-2.0-flash"
timeout_secs = 0
"#,
        )
        .unwrap();
        assert_eq!(config.default.as_deref(), Some("mock"));
        let gemini = config.gemini.to_gemini_config();
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.base_url, "https://generativelanguage.googleapis.com");
        assert!(gemini.timeouts.request.is_none());
    }
}
