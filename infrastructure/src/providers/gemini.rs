//! Google Gemini provider.
//!
//! Talks to the Generative Language API (`models/{model}:generateContent`).
//! URL references are downloaded and attached as base64 `inlineData`; opaque
//! references are named in the prompt.

use crate::http::{TransportFailure, build_client, classify, error_message};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use scribe_application::ports::ai_provider::{AiProvider, ProviderError};
use scribe_domain::{DocumentRef, GEMINI_KEY, GeminiProviderConfig, preview};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Inline payloads above this size are rejected by the API.
const MAX_INLINE_BYTES: usize = 20 * 1024 * 1024;

const DEFAULT_DOCUMENT_MIME: &str = "application/pdf";

const ANSWER_INSTRUCTION: &str = "You are a helpful assistant. Answer clearly and concisely, \
in the same language as the question.";

const GROUNDED_INSTRUCTION: &str = "Answer the question using only the information contained \
in the attached documents. If the documents do not contain the answer, say so plainly. \
Answer in the same language as the question.";

const COMPLETION_INSTRUCTION: &str = "You autocomplete text. The input may be a title or a \
paragraph. Reply with the continuation only: do not repeat the input, do not add quotes \
or explanations. Keep the language and tone of the input.";

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    max_inline_bytes: usize,
}

impl GeminiProvider {
    /// Construction never fails; a missing API key surfaces on the first call.
    pub fn new(config: &GeminiProviderConfig) -> Self {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                "Gemini API key not found (set {}); requests will fail",
                config.api_key_env
            );
        }
        Self {
            client: build_client(&config.timeouts),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            max_inline_bytes: MAX_INLINE_BYTES,
        }
    }

    #[cfg(test)]
    fn with_max_inline_bytes(mut self, limit: usize) -> Self {
        self.max_inline_bytes = limit;
        self
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured(format!("{} is not set", self.api_key_env)))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate(&self, instruction: &str, parts: Vec<Value>) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;

        let body = build_request(instruction, parts);
        info!("Gemini request model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            warn!("Gemini error {}: {}", status.as_u16(), preview(&text, 500));
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let answer = parsed.text()?;
        debug!("Gemini returned {} bytes", answer.len());
        Ok(answer)
    }

    /// Download a URL reference as an inline part.
    ///
    /// The body is read chunk by chunk and abandoned as soon as it passes
    /// the inline size limit.
    async fn fetch_inline(&self, url: &str) -> Result<Value, ProviderError> {
        debug!("Fetching document {}", url);
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::InvalidInput(format!(
                "could not fetch document {}: HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let too_large = |size: String| {
            ProviderError::InvalidInput(format!(
                "document {} is too large: {} bytes (max: {} bytes)",
                url, size, self.max_inline_bytes
            ))
        };

        if let Some(length) = response.content_length()
            && length > self.max_inline_bytes as u64
        {
            return Err(too_large(length.to_string()));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "application/octet-stream")
            .unwrap_or_else(|| DEFAULT_DOCUMENT_MIME.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| transport_error(&e))? {
            if bytes.len() + chunk.len() > self.max_inline_bytes {
                // The rest of the body is never read.
                return Err(too_large(format!("over {}", self.max_inline_bytes)));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(json!({
            "inlineData": {
                "mimeType": mime_type,
                "data": BASE64.encode(&bytes),
            }
        }))
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        GEMINI_KEY
    }

    async fn answer(&self, text: &str) -> Result<String, ProviderError> {
        self.generate(ANSWER_INSTRUCTION, vec![json!({ "text": text })])
            .await
    }

    async fn answer_with_context(
        &self,
        text: &str,
        documents: &[DocumentRef],
    ) -> Result<String, ProviderError> {
        if documents.is_empty() {
            return self.answer(text).await;
        }
        // Nothing is downloaded for a provider that cannot send the request.
        self.api_key()?;

        let mut parts = Vec::with_capacity(documents.len() + 1);
        for document in documents {
            match document {
                DocumentRef::Url(url) => parts.push(self.fetch_inline(url).await?),
                DocumentRef::Opaque(id) => {
                    parts.push(json!({ "text": format!("Referenced document: {}", id) }))
                }
            }
        }
        parts.push(json!({ "text": text }));

        self.generate(GROUNDED_INSTRUCTION, parts).await
    }

    async fn complete(&self, text: &str) -> Result<String, ProviderError> {
        let continuation = self
            .generate(COMPLETION_INSTRUCTION, vec![json!({ "text": text })])
            .await?;
        Ok(extend(text, &continuation))
    }
}

fn build_request(instruction: &str, parts: Vec<Value>) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": instruction }] },
        "contents": [{ "role": "user", "parts": parts }],
    })
}

/// Append `continuation` to `text`, separated by a space when needed.
fn extend(text: &str, continuation: &str) -> String {
    let continuation = continuation.trim();
    if continuation.is_empty() {
        warn!("Gemini returned an empty completion; returning the input unchanged");
        return text.to_string();
    }
    if text.is_empty() || text.ends_with(char::is_whitespace) {
        format!("{}{}", text, continuation)
    } else if continuation.starts_with(|c: char| ",.;:!?)".contains(c)) {
        format!("{}{}", text, continuation)
    } else {
        format!("{} {}", text, continuation)
    }
}

fn transport_error(e: &reqwest::Error) -> ProviderError {
    match classify(e) {
        TransportFailure::Timeout(msg) => ProviderError::Timeout(msg),
        TransportFailure::Connection(msg) => ProviderError::Connection(msg),
        TransportFailure::Decode(msg) => ProviderError::InvalidResponse(msg),
    }
}

// ==================== Response types ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, skipping thoughts.
    fn text(self) -> Result<String, ProviderError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(ProviderError::InvalidResponse(format!(
                "Gemini returned no answer ({})",
                reason
            )));
        };
        Ok(candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}
