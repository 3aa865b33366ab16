//! Domain identifier types with validation
//!
//! Newtype wrappers that keep document identifiers and media unit identifiers
//! from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Query parameter carrying the document id in unresolved link URIs
pub const LINK_ID_PARAMETER: &str = "process.id";

/// Digital object identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use folio::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// Returns `Err` if the id is empty or contains a path separator.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }
        if trimmed.contains('/') || trimmed.contains('\\') {
            return Err(format!("Document ID cannot contain path separators: {trimmed}"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derives a document id from an unresolved cross-reference URI
    ///
    /// Accepts `database://?process.id=42`, a URI whose last path segment is
    /// the id, or the bare id itself.
    ///
    /// ```
    /// use folio::domain::ids::DocumentId;
    ///
    /// let id = DocumentId::from_link_uri("database://?process.id=42").unwrap();
    /// assert_eq!(id.as_str(), "42");
    /// ```
    pub fn from_link_uri(uri: &str) -> Result<Self, String> {
        if let Ok(parsed) = Url::parse(uri) {
            if let Some((_, value)) = parsed
                .query_pairs()
                .find(|(key, _)| key == LINK_ID_PARAMETER)
            {
                return Self::new(value.into_owned());
            }
            if let Some(segment) = parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            {
                return Self::new(segment);
            }
            return Err(format!("Cannot derive a document ID from link '{uri}'"));
        }
        Self::new(uri)
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Media unit identifier newtype wrapper
///
/// Views reference media units by this identity, so two views are the same
/// view exactly when their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaUnitId(String);

impl MediaUnitId {
    /// Creates a new MediaUnitId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Media unit ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the media unit ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MediaUnitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_valid() {
        let id = DocumentId::new(" 42 ").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_document_id_rejects_empty_and_separators() {
        assert!(DocumentId::new("").is_err());
        assert!(DocumentId::new("   ").is_err());
        assert!(DocumentId::new("../42").is_err());
    }

    #[test]
    fn test_document_id_from_database_link() {
        let id = DocumentId::from_link_uri("database://?process.id=42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_document_id_from_path_link() {
        let id = DocumentId::from_link_uri("https://repo.example.org/processes/1337").unwrap();
        assert_eq!(id.as_str(), "1337");

        let id = DocumentId::from_link_uri("https://repo.example.org/processes/77/").unwrap();
        assert_eq!(id.as_str(), "77");
    }

    #[test]
    fn test_document_id_from_bare_id() {
        let id = DocumentId::from_link_uri("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_document_id_from_link_without_id() {
        assert!(DocumentId::from_link_uri("database://").is_err());
    }

    #[test]
    fn test_media_unit_id() {
        assert!(MediaUnitId::new("").is_err());
        let id = MediaUnitId::from_str("PHYS_0001").unwrap();
        assert_eq!(id.as_str(), "PHYS_0001");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = DocumentId::new("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
