//! Document operations use case.
//!
//! Plain CRUD over the [`DocumentStore`] port, consumed directly by the
//! transport. Ownership is re-asserted on every call by matching the supplied
//! email against the stored owner; a mismatch looks exactly like a missing
//! document.

use crate::ports::document_store::DocumentStore;
use crate::ports::user_store::StoreError;
use scribe_domain::{
    Document, DocumentId, DocumentList, DomainError, ErrorKind, require_email,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during document operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("{0}")]
    InvalidInput(#[from] DomainError),

    #[error("Document {0} not found")]
    NotFound(DocumentId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocumentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocumentError::InvalidInput(_) => ErrorKind::InvalidInput,
            // Not-found is a caller mistake from the transport's point of view.
            DocumentError::NotFound(_) => ErrorKind::InvalidInput,
            DocumentError::Store(e) => e.kind(),
        }
    }
}

/// CRUD over documents scoped by owner email.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, content: &str, email: &str) -> Result<Document, DocumentError> {
        let email = require_email(email)?;
        require_content(content)?;
        let document = self.store.create_document(content, email).await?;
        info!("Created document {} for {}", document.id, email);
        Ok(document)
    }

    pub async fn list(&self, email: &str) -> Result<DocumentList, DocumentError> {
        let email = require_email(email)?;
        let documents: Vec<Document> = self
            .store
            .get_documents_by_email(email)
            .await?
            .into_iter()
            .filter(|d| d.is_owned_by(email))
            .collect();
        debug!("Listed {} documents for {}", documents.len(), email);
        Ok(DocumentList::from(documents))
    }

    pub async fn get(&self, id: DocumentId, email: &str) -> Result<Document, DocumentError> {
        let email = require_email(email)?;
        let found = self.store.get_document_by_id(id, email).await?;
        owned(found, id, email)
    }

    pub async fn update(
        &self,
        id: DocumentId,
        content: &str,
        email: &str,
    ) -> Result<Document, DocumentError> {
        let email = require_email(email)?;
        require_content(content)?;
        // Check ownership before writing so a foreign id is never modified.
        self.get(id, email).await?;
        let updated = self.store.update_document(id, content, email).await?;
        let document = owned(updated, id, email)?;
        info!("Updated document {} for {}", id, email);
        Ok(document)
    }

    pub async fn delete(&self, id: DocumentId, email: &str) -> Result<Document, DocumentError> {
        let email = require_email(email)?;
        self.get(id, email).await?;
        let deleted = self.store.delete_document(id, email).await?;
        let document = owned(deleted, id, email)?;
        info!("Deleted document {} for {}", id, email);
        Ok(document)
    }
}

fn require_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        Err(DomainError::EmptyContent)
    } else {
        Ok(())
    }
}

fn owned(found: Option<Document>, id: DocumentId, email: &str) -> Result<Document, DocumentError> {
    match found {
        Some(document) if document.is_owned_by(email) => Ok(document),
        _ => Err(DocumentError::NotFound(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Store that ignores the email filter, to prove the service re-checks it.
    #[derive(Default)]
    struct LeakyStore {
        docs: Mutex<Vec<Document>>,
        writes: Mutex<usize>,
    }

    impl LeakyStore {
        fn with(docs: Vec<Document>) -> Self {
            Self {
                docs: Mutex::new(docs),
                writes: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for LeakyStore {
        async fn create_document(&self, content: &str, email: &str) -> Result<Document, StoreError> {
            let mut docs = self.docs.lock().unwrap();
            let doc = doc(docs.len() as i64 + 1, email, content);
            docs.push(doc.clone());
            Ok(doc)
        }

        async fn get_documents_by_email(&self, _email: &str) -> Result<Vec<Document>, StoreError> {
            Ok(self.docs.lock().unwrap().clone())
        }

        async fn get_document_by_id(
            &self,
            id: DocumentId,
            _email: &str,
        ) -> Result<Option<Document>, StoreError> {
            Ok(self.docs.lock().unwrap().iter().find(|d| d.id == id).cloned())
        }

        async fn update_document(
            &self,
            id: DocumentId,
            content: &str,
            _email: &str,
        ) -> Result<Option<Document>, StoreError> {
            *self.writes.lock().unwrap() += 1;
            let mut docs = self.docs.lock().unwrap();
            Ok(docs.iter_mut().find(|d| d.id == id).map(|d| {
                d.content = content.to_string();
                d.clone()
            }))
        }

        async fn delete_document(
            &self,
            id: DocumentId,
            _email: &str,
        ) -> Result<Option<Document>, StoreError> {
            *self.writes.lock().unwrap() += 1;
            let mut docs = self.docs.lock().unwrap();
            let idx = docs.iter().position(|d| d.id == id);
            Ok(idx.map(|i| docs.remove(i)))
        }
    }

    struct DownStore;

    #[async_trait]
    impl DocumentStore for DownStore {
        async fn create_document(&self, _: &str, _: &str) -> Result<Document, StoreError> {
            Err(StoreError::Connection("connection refused".into()))
        }
        async fn get_documents_by_email(&self, _: &str) -> Result<Vec<Document>, StoreError> {
            Err(StoreError::Timeout("30s".into()))
        }
        async fn get_document_by_id(
            &self,
            _: DocumentId,
            _: &str,
        ) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Connection("connection refused".into()))
        }
        async fn update_document(
            &self,
            _: DocumentId,
            _: &str,
            _: &str,
        ) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Connection("connection refused".into()))
        }
        async fn delete_document(
            &self,
            _: DocumentId,
            _: &str,
        ) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Connection("connection refused".into()))
        }
    }

    fn doc(id: i64, email: &str, content: &str) -> Document {
        Document {
            id,
            email: email.to_string(),
            content: content.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn service(store: LeakyStore) -> (DocumentService, Arc<LeakyStore>) {
        let store = Arc::new(store);
        (DocumentService::new(store.clone()), store)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_create_and_list() {
        let (svc, _) = service(LeakyStore::default());
        let created = svc.create("mis notas", "ana@x.com").await.unwrap();
        assert_eq!(created.email, "ana@x.com");

        let list = svc.list("ana@x.com").await.unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.documents[0].content, "mis notas");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_input() {
        let (svc, _) = service(LeakyStore::default());
        assert!(matches!(
            svc.create("   ", "ana@x.com").await,
            Err(DocumentError::InvalidInput(DomainError::EmptyContent))
        ));
        assert!(matches!(
            svc.create("hola", "").await,
            Err(DocumentError::InvalidInput(DomainError::InvalidEmail(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_foreign_documents() {
        let (svc, _) = service(LeakyStore::with(vec![
            doc(1, "ana@x.com", "a"),
            doc(2, "luis@x.com", "b"),
        ]));
        let list = svc.list("ana@x.com").await.unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.documents[0].id, 1);
    }

    #[tokio::test]
    async fn test_get_foreign_document_is_not_found() {
        let (svc, _) = service(LeakyStore::with(vec![doc(2, "luis@x.com", "b")]));
        let err = svc.get(2, "ana@x.com").await.unwrap_err();
        assert_eq!(err, DocumentError::NotFound(2));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_update_foreign_document_never_writes() {
        let (svc, store) = service(LeakyStore::with(vec![doc(2, "luis@x.com", "b")]));
        assert!(svc.update(2, "hijacked", "ana@x.com").await.is_err());
        assert!(svc.delete(2, "ana@x.com").await.is_err());
        assert_eq!(*store.writes.lock().unwrap(), 0);
        assert_eq!(svc.get(2, "luis@x.com").await.unwrap().content, "b");
    }

    #[tokio::test]
    async fn test_update_and_delete_own_document() {
        let (svc, _) = service(LeakyStore::with(vec![doc(1, "ana@x.com", "a")]));
        let updated = svc.update(1, "nuevo", "ana@x.com").await.unwrap();
        assert_eq!(updated.content, "nuevo");

        let deleted = svc.delete(1, "ana@x.com").await.unwrap();
        assert_eq!(deleted.id, 1);
        assert_eq!(svc.list("ana@x.com").await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_store_errors_keep_their_kind() {
        let svc = DocumentService::new(Arc::new(DownStore));
        let err = svc.list("ana@x.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        let err = svc.create("x", "ana@x.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "Connection error: connection refused");
    }
}
