//! Document entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric document identifier assigned by the persistence backend
pub type DocumentId = i64;

/// A stored text document (Entity)
///
/// Owned by the persistence backend; the core only passes it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Owner identity. Every document operation re-checks it.
    pub email: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Check whether `email` owns this document
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email == email
    }
}

/// A user's documents, as returned by the list operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<Document>,
    pub count: usize,
}

impl From<Vec<Document>> for DocumentList {
    fn from(documents: Vec<Document>) -> Self {
        let count = documents.len();
        Self { documents, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(email: &str) -> Document {
        Document {
            id: 7,
            email: email.to_string(),
            content: "notas".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_ownership_is_exact_match() {
        let d = doc("ana@example.com");
        assert!(d.is_owned_by("ana@example.com"));
        assert!(!d.is_owned_by("ANA@example.com"));
        assert!(!d.is_owned_by("otro@example.com"));
    }

    #[test]
    fn test_document_list_counts() {
        let list = DocumentList::from(vec![doc("a@x.com"), doc("a@x.com")]);
        assert_eq!(list.count, 2);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["count"], 2);
        assert!(json["documents"][0].get("created_at").is_none());
    }

    #[test]
    fn test_deserialize_backend_row() {
        let row = r#"{"id": 3, "email": "a@x.com", "content": "hola", "created_at": "2024-05-01T10:00:00Z"}"#;
        let d: Document = serde_json::from_str(row).unwrap();
        assert_eq!(d.id, 3);
        assert!(d.created_at.is_some());
        assert!(d.updated_at.is_none());
    }
}
