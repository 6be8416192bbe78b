//! Document references handed to grounded question answering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a document used as grounding material
///
/// Parsed from plain strings: anything starting with `http://` or `https://`
/// is a [`DocumentRef::Url`], everything else is an opaque identifier whose
/// meaning is left to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentRef {
    Url(String),
    Opaque(String),
}

impl DocumentRef {
    /// Classify a raw reference string
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentRef::Url(trimmed.to_string())
        } else {
            DocumentRef::Opaque(trimmed.to_string())
        }
    }

    /// Parse a list of raw references, dropping blank entries
    pub fn parse_all<I, S>(raw: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        raw.into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.trim().is_empty())
            .map(DocumentRef::parse)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocumentRef::Url(s) | DocumentRef::Opaque(s) => s,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, DocumentRef::Url(_))
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DocumentRef {
    fn from(s: String) -> Self {
        DocumentRef::parse(s)
    }
}

impl From<&str> for DocumentRef {
    fn from(s: &str) -> Self {
        DocumentRef::parse(s)
    }
}

impl From<DocumentRef> for String {
    fn from(r: DocumentRef) -> Self {
        match r {
            DocumentRef::Url(s) | DocumentRef::Opaque(s) => s,
        }
    }
}
