//! AI provider adapters and the registry that selects between them.

pub mod gemini;
pub mod mock;
pub mod registry;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use registry::{ProviderConstructor, ProviderRegistry};
