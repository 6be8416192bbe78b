//! Document store port

use super::user_store::StoreError;
use async_trait::async_trait;
use scribe_domain::{Document, DocumentId};

/// Document CRUD of the persistence backend
///
/// Every operation is scoped by the owner `email`; lookups for a document
/// owned by someone else answer `Ok(None)`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(&self, content: &str, email: &str) -> Result<Document, StoreError>;

    async fn get_documents_by_email(&self, email: &str) -> Result<Vec<Document>, StoreError>;

    async fn get_document_by_id(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn update_document(
        &self,
        id: DocumentId,
        content: &str,
        email: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove a document, returning it as it was before deletion
    async fn delete_document(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError>;
}
