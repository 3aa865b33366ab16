//! Collaborator traits
//!
//! The export engine talks to its surroundings only through these traits:
//! template substitution, rendition file lookup and the document store.

use crate::domain::{
    DocumentContext, DocumentId, DocumentIdentity, RenditionPolicy, Result, TemplateError,
};
use async_trait::async_trait;
use url::Url;

/// Substitutes variables in a template string
///
/// Implementations are pure from the engine's point of view.
pub trait TemplateResolver: Send + Sync {
    /// Returns `template` with every token replaced from `context`
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if a token cannot be resolved.
    fn substitute(
        &self,
        template: &str,
        context: &DocumentContext,
    ) -> std::result::Result<String, TemplateError>;
}

/// Finds the files of a rendition for a canonical stem
pub trait RenditionLocator: Send + Sync {
    /// Returns the storage URI the rendition of `stem` has under `policy`
    ///
    /// # Errors
    ///
    /// Returns `LocatorIo` or `Template` errors if the location cannot be built.
    fn locate(&self, policy: &RenditionPolicy, stem: &str) -> Result<Url>;

    /// Tests whether the rendition of `stem` physically exists under `policy`
    ///
    /// # Errors
    ///
    /// Returns `LocatorIo` if the existence check itself fails.
    fn exists(&self, policy: &RenditionPolicy, stem: &str) -> Result<bool>;
}

/// Looks up documents managed by the persistence layer
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// Fetches the identity of a document
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    async fn lookup(&self, id: &DocumentId) -> Result<DocumentIdentity>;
}
