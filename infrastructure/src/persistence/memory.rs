//! Process-local backend for tests and offline runs.

use async_trait::async_trait;
use chrono::Utc;
use scribe_application::ports::document_store::DocumentStore;
use scribe_application::ports::user_store::{StoreError, UserStore};
use scribe_domain::{Credentials, Document, DocumentId, NewUser, UserProfile};
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

struct Account {
    id: String,
    name: String,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    documents: BTreeMap<DocumentId, Document>,
    next_document_id: DocumentId,
    next_user_id: u64,
}

/// In-memory implementation of both persistence ports.
///
/// Passwords are kept in plain text; never point real users at it.
#[derive(Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::InvalidResponse("in-memory state poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::InvalidResponse("in-memory state poisoned".to_string()))
    }

    fn profile(email: &str, account: &Account) -> UserProfile {
        UserProfile {
            id: account.id.clone(),
            email: email.to_string(),
            name: Some(account.name.clone()),
            access_token: Some(format!("memory-token-{}", account.id)),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryBackend {
    async fn register_user(&self, user: &NewUser) -> Result<UserProfile, StoreError> {
        let mut state = self.write()?;
        let email = user.email().to_string();
        if state.accounts.contains_key(&email) {
            return Err(StoreError::Rejected("User already registered".to_string()));
        }

        state.next_user_id += 1;
        let account = Account {
            id: format!("user-{}", state.next_user_id),
            name: user.name.clone(),
            password: user.credentials.password.clone(),
        };
        let profile = Self::profile(&email, &account);
        debug!("Registered in-memory user {}", profile.id);
        state.accounts.insert(email, account);
        Ok(profile)
    }

    async fn login_user(&self, credentials: &Credentials) -> Result<UserProfile, StoreError> {
        let state = self.read()?;
        match state.accounts.get(&credentials.email) {
            Some(account) if account.password == credentials.password => {
                Ok(Self::profile(&credentials.email, account))
            }
            _ => Err(StoreError::Rejected("Invalid login credentials".to_string())),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryBackend {
    async fn create_document(&self, content: &str, email: &str) -> Result<Document, StoreError> {
        let mut state = self.write()?;
        state.next_document_id += 1;
        let now = Utc::now();
        let document = Document {
            id: state.next_document_id,
            email: email.to_string(),
            content: content.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn get_documents_by_email(&self, email: &str) -> Result<Vec<Document>, StoreError> {
        let state = self.read()?;
        Ok(state
            .documents
            .values()
            .filter(|d| d.is_owned_by(email))
            .cloned()
            .collect())
    }

    async fn get_document_by_id(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let state = self.read()?;
        Ok(state
            .documents
            .get(&id)
            .filter(|d| d.is_owned_by(email))
            .cloned())
    }

    async fn update_document(
        &self,
        id: DocumentId,
        content: &str,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let mut state = self.write()?;
        let Some(document) = state
            .documents
            .get_mut(&id)
            .filter(|d| d.is_owned_by(email))
        else {
            return Ok(None);
        };
        document.content = content.to_string();
        document.updated_at = Some(Utc::now());
        Ok(Some(document.clone()))
    }

    async fn delete_document(
        &self,
        id: DocumentId,
        email: &str,
    ) -> Result<Option<Document>, StoreError> {
        let mut state = self.write()?;
        let owned = state
            .documents
            .get(&id)
            .is_some_and(|d| d.is_owned_by(email));
        if !owned {
            return Ok(None);
        }
        Ok(state.documents.remove(&id))
    }
}
