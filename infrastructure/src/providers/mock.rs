//! Deterministic mock provider.
//!
//! Echoes its input in fixed templates, with no network access and no state,
//! so repeated calls with the same input always produce the same output.

use async_trait::async_trait;
use scribe_application::ports::ai_provider::{AiProvider, ProviderError};
use scribe_domain::{DocumentRef, MOCK_KEY};

#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    fn name(&self) -> &str {
        MOCK_KEY
    }

    async fn answer(&self, text: &str) -> Result<String, ProviderError> {
        Ok(format!("Respuesta simulada para: {}", text))
    }

    async fn answer_with_context(
        &self,
        text: &str,
        documents: &[DocumentRef],
    ) -> Result<String, ProviderError> {
        if documents.is_empty() {
            return self.answer(text).await;
        }
        Ok(format!(
            "Respuesta con {} documentos para: {}",
            documents.len(),
            text
        ))
    }

    async fn complete(&self, text: &str) -> Result<String, ProviderError> {
        Ok(format!("{} [continuación simulada]", text))
    }
}
