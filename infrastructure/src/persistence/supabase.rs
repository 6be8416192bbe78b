//! Supabase backend: GoTrue auth for accounts, PostgREST for documents.

use crate::http::{TransportFailure, build_client, classify, error_message};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use scribe_application::ports::document_store::DocumentStore;
use scribe_application::ports::user_store::{StoreError, UserStore};
use scribe_domain::{Credentials, Document, DocumentId, NewUser, SupabaseBackendConfig, UserProfile};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons a [`SupabaseBackend`] cannot be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupabaseSetupError {
    #[error("Supabase URL is not configured (set backend.supabase.url)")]
    MissingUrl,

    #[error("Supabase API key not found (set {0})")]
    MissingApiKey(String),
}

pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    api_key: String,
    documents_table: String,
}

impl SupabaseBackend {
    pub fn new(config: &SupabaseBackendConfig) -> Result<Self, SupabaseSetupError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SupabaseSetupError::MissingUrl);
        }
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| SupabaseSetupError::MissingApiKey(config.api_key_env.clone()))?;

        info!("Supabase backend at {}", base_url);
        Ok(Self {
            client: build_client(&config.timeouts),
            base_url,
            api_key,
            documents_table: config.documents_table.clone(),
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.documents_table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Rows matching `id` and owner, as PostgREST filters.
    fn owned_row(id: DocumentId, email: &str) -> [(&'static str, String); 2] {
        [("id", format!("eq.{}", id)), ("email", format!("eq.{}", email))]
    }

    async fn send_auth(&self, request: RequestBuilder) -> Result<UserProfile, StoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            return Err(auth_failure(status, &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        profile_from_auth(value)
    }

    /// Send a PostgREST request that answers with an array of rows.
    async fn send_rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = self
            .authorized(request)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        decode_rows(response).await
    }
}

#[async_trait]
impl UserStore for SupabaseBackend {
    async fn register_user(&self, user: &NewUser) -> Result<UserProfile, StoreError> {
        debug!("Supabase signup for {}", user.email());
        let body = json!({
            "email": user.email(),
            "password": user.credentials.password,
            "data": { "name": user.name },
        });
        self.send_auth(self.client.post(self.auth_url("signup")).json(&body))
            .await
    }

    async fn login_user(&self, credentials: &Credentials) -> Result<UserProfile, StoreError> {
        debug!("Supabase password login for {}", credentials.email);
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let request = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&body);
        self.send_auth(request).await
    }
}

#[async_trait]
impl DocumentStore for SupabaseBackend {
    async fn create_document(&self, content: &str, email: &str) -> Result<Document, StoreError> {
        let request = self
            .client
            .post(self.table_url())
            .json(&json!({ "content": content, "email": email }));
        self.send_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse("insert returned no rows".to_string()))
    }

    async fn get_documents_by_email(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        let request = self.client.get(self.table_url()).query(&[
            ("select", "*".to_string()),
            ("email", format!("eq.{}", email)),
            ("order", "id.asc".to_string()),
        ]);
        self.send_rows(request).await
    }

    async fn get_document_by_id(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "*")])
            .query(&Self::owned_row(id, email));
        Ok(self.send_rows(request).await?.into_iter().next())
    }

    async fn update_document(
        &self,
        id: DocumentId,
        content: &str,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&Self::owned_row(id, email))
            .json(&json!({ "content": content }));
        Ok(self.send_rows(request).await?.into_iter().next())
    }

    async fn delete_document(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let request = self
            .client
            .delete(self.table_url())
            .query(&Self::owned_row(id, email));
        Ok(self.send_rows(request).await?.into_iter().next())
    }
}

async fn decode_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, StoreError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| transport_error(&e))?;
    if !status.is_success() {
        warn!("PostgREST error {}: {}", status.as_u16(), body);
        return Err(StoreError::Backend {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| StoreError::InvalidResponse(e.to_string()))
}

/// Credential and validation failures are the caller's fault; anything else is the backend's.
fn auth_failure(status: StatusCode, body: &str) -> StoreError {
    let message = error_message(body);
    match status.as_u16() {
        400 | 401 | 422 => StoreError::Rejected(message),
        code => StoreError::Backend {
            status: code,
            message,
        },
    }
}

/// Build a profile from a GoTrue answer.
///
/// Password grants wrap the user in a session; signups with email
/// confirmation enabled return the bare user.
fn profile_from_auth(value: Value) -> Result<UserProfile, StoreError> {
    let access_token = value
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string);
    let user = value.get("user").unwrap_or(&value);

    let id = user
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidResponse("auth response has no user id".to_string()))?;
    let email = user
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let name = user
        .pointer("/user_metadata/name")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(UserProfile {
        id: id.to_string(),
        email: email.to_string(),
        name,
        access_token,
    })
}

fn transport_error(e: &reqwest::Error) -> StoreError {
    match classify(e) {
        TransportFailure::Timeout(msg) => StoreError::Timeout(msg),
        TransportFailure::Connection(msg) => StoreError::Connection(msg),
        TransportFailure::Decode(msg) => StoreError::InvalidResponse(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: Option<&str>) -> SupabaseBackendConfig {
        SupabaseBackendConfig {
            url: url.to_string(),
            api_key_env: "SCRIBE_TEST_UNSET_SUPABASE_KEY".to_string(),
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_url_and_key() {
        assert_eq!(
            SupabaseBackend::new(&config("  ", Some("k"))).err(),
            Some(SupabaseSetupError::MissingUrl)
        );
        assert_eq!(
            SupabaseBackend::new(&config("https://abc.supabase.co", None)).err(),
            Some(SupabaseSetupError::MissingApiKey(
                "SCRIBE_TEST_UNSET_SUPABASE_KEY".to_string()
            ))
        );
    }

    #[test]
    fn test_urls() {
        let backend = SupabaseBackend::new(&config("https://abc.supabase.co/", Some("k"))).unwrap();
        assert_eq!(backend.auth_url("signup"), "https://abc.supabase.co/auth/v1/signup");
        assert_eq!(backend.table_url(), "https://abc.supabase.co/rest/v1/documents");
    }

    #[test]
    fn test_profile_from_session() {
        let value = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "user": {
                "id": "u-1",
                "email": "ana@example.com",
                "user_metadata": { "name": "Ana" }
            }
        });
        let profile = profile_from_auth(value).unwrap();
        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.name.as_deref(), Some("Ana"));
        assert_eq!(profile.access_token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_profile_from_bare_user() {
        let value = json!({ "id": "u-2", "email": "bob@example.com", "user_metadata": {} });
        let profile = profile_from_auth(value).unwrap();
        assert_eq!(profile.id, "u-2");
        assert!(profile.name.is_none());
        assert!(profile.access_token.is_none());
    }

    #[test]
    fn test_profile_without_id_is_invalid() {
        let err = profile_from_auth(json!({ "msg": "ok" })).unwrap_err();
        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_auth_failure_mapping() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            auth_failure(StatusCode::BAD_REQUEST, body),
            StoreError::Rejected("Invalid login credentials".to_string())
        );
        assert_eq!(
            auth_failure(StatusCode::UNPROCESSABLE_ENTITY, r#"{"msg":"User already registered"}"#),
            StoreError::Rejected("User already registered".to_string())
        );
        assert!(matches!(
            auth_failure(StatusCode::SERVICE_UNAVAILABLE, "down"),
            StoreError::Backend { status: 503, .. }
        ));
    }

    #[test]
    fn test_document_row_decodes() {
        let rows: Vec<Document> = serde_json::from_str(
            r#"[{"id": 3, "email": "ana@example.com", "content": "hola",
                 "created_at": "2024-05-01T10:00:00.123456+00:00"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].id, 3);
        assert!(rows[0].created_at.is_some());
        assert!(rows[0].updated_at.is_none());
    }
}
