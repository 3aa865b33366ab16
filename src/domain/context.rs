//! Template contexts and document identities
//!
//! A [`DocumentContext`] is the set of variables a template is substituted
//! against. A [`DocumentIdentity`] is what the persistence layer reports
//! about a linked document.

use super::ids::DocumentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context variable holding the document id
pub const VAR_ID: &str = "id";
/// Context variable holding the document title
pub const VAR_TITLE: &str = "title";
/// Context variable holding the document base type
pub const VAR_BASE_TYPE: &str = "baseType";

/// Variables available to template substitution for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentContext(BTreeMap<String, String>);

impl DocumentContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, replacing an existing one of the same name
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a variable
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Looks up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the context has no variables
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DocumentContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Identity of a document as reported by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIdentity {
    /// Document id
    pub id: DocumentId,

    /// Type label of the document's root structure, e.g. `monograph`
    pub base_type: String,

    /// Template variables of the document
    pub context: DocumentContext,
}

impl DocumentIdentity {
    /// Creates an identity whose context carries the standard variables
    pub fn new(
        id: DocumentId,
        title: impl Into<String>,
        base_type: impl Into<String>,
        variables: DocumentContext,
    ) -> Self {
        let base_type = base_type.into();
        let mut context = variables;
        context.insert(VAR_ID, id.as_str());
        context.insert(VAR_TITLE, title);
        context.insert(VAR_BASE_TYPE, base_type.clone());
        Self {
            id,
            base_type,
            context,
        }
    }
}
