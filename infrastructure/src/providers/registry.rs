//! String-keyed provider registry.
//!
//! Maps a provider key to a constructor. Lookup never fails: unknown keys
//! resolve to the constructor registered under [`DEFAULT_KEY`]. Startup
//! configuration goes through [`ProviderKind`] and
//! [`create_kind`](ProviderRegistry::create_kind); the string form stays for
//! providers registered at runtime.

use super::{GeminiProvider, MockProvider};
use scribe_application::ports::ai_provider::AiProvider;
use scribe_domain::{DEFAULT_KEY, GEMINI_KEY, MOCK_KEY, ProviderConfig, ProviderKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds a fresh provider handle.
pub type ProviderConstructor = Arc<dyn Fn() -> Arc<dyn AiProvider> + Send + Sync>;

pub struct ProviderRegistry {
    /// Always present; `register(DEFAULT_KEY, ..)` replaces it.
    default: ProviderConstructor,
    constructors: HashMap<String, ProviderConstructor>,
}

impl ProviderRegistry {
    /// Create a registry whose fallback is `default`.
    pub fn new<F>(default: F) -> Self
    where
        F: Fn() -> Arc<dyn AiProvider> + Send + Sync + 'static,
    {
        Self {
            default: Arc::new(default),
            constructors: HashMap::new(),
        }
    }

    /// Registry with the built-in providers: `gemini`, `mock`, and `default`
    /// aliasing `gemini`.
    pub fn with_builtins(config: &ProviderConfig) -> Self {
        let gemini_config = config.gemini.clone();
        let gemini: ProviderConstructor =
            Arc::new(move || Arc::new(GeminiProvider::new(&gemini_config)) as Arc<dyn AiProvider>);

        let mut registry = Self {
            default: gemini.clone(),
            constructors: HashMap::new(),
        };
        registry.constructors.insert(GEMINI_KEY.to_string(), gemini);
        registry.register(MOCK_KEY, || Arc::new(MockProvider::new()) as Arc<dyn AiProvider>);
        registry
    }

    /// Add or replace the constructor for `kind`. Last registration wins.
    pub fn register<F>(&mut self, kind: &str, constructor: F)
    where
        F: Fn() -> Arc<dyn AiProvider> + Send + Sync + 'static,
    {
        let key = normalize(kind);
        debug!("Registering provider '{}'", key);
        if key == DEFAULT_KEY {
            self.default = Arc::new(constructor);
        } else {
            self.constructors.insert(key, Arc::new(constructor));
        }
    }

    /// Build the provider registered under `kind`, or the default one.
    pub fn create(&self, kind: &str) -> Arc<dyn AiProvider> {
        let key = normalize(kind);
        if key == DEFAULT_KEY {
            return (self.default)();
        }
        match self.constructors.get(&key) {
            Some(constructor) => constructor(),
            None => {
                warn!("Unknown provider '{}', falling back to default", kind);
                (self.default)()
            }
        }
    }

    /// Build the provider registered under `DEFAULT_KEY`.
    pub fn create_default(&self) -> Arc<dyn AiProvider> {
        (self.default)()
    }

    /// Build a built-in provider selected through configuration.
    pub fn create_kind(&self, kind: ProviderKind) -> Arc<dyn AiProvider> {
        self.create(kind.key())
    }

    pub fn contains(&self, kind: &str) -> bool {
        let key = normalize(kind);
        key == DEFAULT_KEY || self.constructors.contains_key(&key)
    }

    /// All registered keys, sorted, including `default`.
    pub fn registered_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.constructors.keys().cloned().collect();
        kinds.push(DEFAULT_KEY.to_string());
        kinds.sort();
        kinds
    }
}

fn normalize(kind: &str) -> String {
    let key = kind.trim().to_lowercase();
    if key.is_empty() {
        DEFAULT_KEY.to_string()
    } else {
        key
    }
}
