//! Shared outbound HTTP plumbing for the Gemini and Supabase adapters.

use reqwest::Client;
use scribe_domain::HttpTimeouts;
use tracing::warn;

/// Build a client honouring the configured deadlines.
///
/// No retries are layered on top: each workflow makes a single attempt.
pub(crate) fn build_client(timeouts: &HttpTimeouts) -> Client {
    let mut builder = Client::builder()
        .connect_timeout(timeouts.connect)
        .user_agent(concat!("scribe/", env!("CARGO_PKG_VERSION")));
    if let Some(request) = timeouts.request {
        builder = builder.timeout(request);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Could not build configured HTTP client ({}), using defaults", e);
        Client::new()
    })
}

/// Coarse classification of a `reqwest` failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransportFailure {
    Timeout(String),
    Connection(String),
    Decode(String),
}

pub(crate) fn classify(e: &reqwest::Error) -> TransportFailure {
    if e.is_timeout() {
        TransportFailure::Timeout(e.to_string())
    } else if e.is_decode() {
        TransportFailure::Decode(e.to_string())
    } else {
        // Connect, request-building and body errors all mean the backend was
        // not reached or did not answer.
        TransportFailure::Connection(e.to_string())
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// Supabase and Google use different field names; fall back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["msg", "error_description", "message"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
        // Google nests it: {"error": {"message": ...}}
        if let Some(msg) = value
            .get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(|v| v.as_str())
        {
            return msg.to_string();
        }
    }
    scribe_domain::preview(body.trim(), 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_supabase_fields() {
        assert_eq!(
            error_message(r#"{"code":400,"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_error_message_google_nested() {
        assert_eq!(
            error_message(r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#),
            "Quota exceeded"
        );
    }

    #[test]
    fn test_error_message_plain_string_error() {
        assert_eq!(error_message(r#"{"error":"boom"}"#), "boom");
    }

    #[test]
    fn test_error_message_non_json() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        let long = "x".repeat(500);
        assert_eq!(error_message(&long).chars().count(), 203);
    }

    #[test]
    fn test_build_client_without_deadline() {
        let _client = build_client(&HttpTimeouts::from_secs(0, 1));
    }
}
