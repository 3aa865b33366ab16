//! JSON document store
//!
//! Each digital object is one `<id>.json` file in the documents directory,
//! holding its title, parent, template variables and structural tree.

use super::traits::DocumentLookup;
use crate::domain::{
    DocumentContext, DocumentId, DocumentIdentity, DocumentTree, FolioError, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A digital object as persisted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    /// Document id, matching the file name
    pub id: DocumentId,

    /// Human-readable title
    #[serde(default)]
    pub title: String,

    /// Parent document, for volumes of a multi-volume work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<DocumentId>,

    /// Additional template variables
    #[serde(default)]
    pub variables: DocumentContext,

    /// Structural tree and media units
    pub tree: DocumentTree,
}

impl StoredDocument {
    /// The document's base type: the type label of its root structure
    pub fn base_type(&self) -> &str {
        &self.tree.root.node_type
    }

    /// Builds the document's identity and template context
    pub fn identity(&self) -> DocumentIdentity {
        DocumentIdentity::new(
            self.id.clone(),
            self.title.clone(),
            self.base_type(),
            self.variables.clone(),
        )
    }
}

/// Document store reading `<id>.json` files from one directory
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
}

impl JsonDocumentStore {
    /// Creates a store over a documents directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the documents directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.root.join(format!("{}.json", id.as_str()))
    }

    /// Loads a stored document
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no file exists for the id, `Storage` if it cannot
    /// be read and `Serialization` if it is not a valid document.
    pub async fn load(&self, id: &DocumentId) -> Result<StoredDocument> {
        let path = self.path_for(id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FolioError::NotFound(id.to_string()));
            }
            Err(e) => {
                return Err(FolioError::Storage(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let document: StoredDocument = serde_json::from_str(&contents).map_err(|e| {
            FolioError::Serialization(format!("Invalid document {}: {e}", path.display()))
        })?;

        if document.id != *id {
            return Err(FolioError::Storage(format!(
                "Document file {} holds id {}",
                path.display(),
                document.id
            )));
        }

        tracing::debug!(document_id = %id, path = %path.display(), "Loaded document");
        Ok(document)
    }

    /// Persists a document, replacing an existing file
    pub async fn save(&self, document: &StoredDocument) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(self.path_for(&document.id), json).await?;
        Ok(())
    }

    /// Lists the ids of all stored documents in ascending order
    pub async fn list_ids(&self) -> Result<Vec<DocumentId>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            FolioError::Storage(format!(
                "Failed to list {}: {e}",
                self.root.display()
            ))
        })?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| DocumentId::new(stem).ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl DocumentLookup for JsonDocumentStore {
    async fn lookup(&self, id: &DocumentId) -> Result<DocumentIdentity> {
        Ok(self.load(id).await?.identity())
    }
}
