//! Export location rewriting
//!
//! Every rendition whose use label has a policy gets a new URI: the policy's
//! `url_structure` with the current file name appended, substituted against
//! the exported document's context. Renditions outside the project's policies
//! keep their URI.

use crate::adapters::TemplateResolver;
use crate::domain::{
    file_name, DocumentContext, DocumentTree, FolioError, RenditionPolicies, Result,
};
use url::Url;

/// Rewrites rendition URIs into export locations
pub struct LocationRewriter<'a> {
    policies: &'a RenditionPolicies,
    resolver: &'a dyn TemplateResolver,
    context: &'a DocumentContext,
}

impl<'a> LocationRewriter<'a> {
    /// Creates a rewriter for one document
    pub fn new(
        policies: &'a RenditionPolicies,
        resolver: &'a dyn TemplateResolver,
        context: &'a DocumentContext,
    ) -> Self {
        Self {
            policies,
            resolver,
            context,
        }
    }

    /// Rewrites the locations of all media units, returning how many changed
    ///
    /// # Errors
    ///
    /// Returns `Template` if substitution fails and `MalformedLocation` if the
    /// result is not a valid URI.
    pub fn rewrite_locations(&self, tree: &mut DocumentTree) -> Result<usize> {
        let mut rewritten = 0;

        for unit in &mut tree.media_units {
            for (kind, uri) in unit.media_files.iter_mut() {
                let Some(policy) = self.policies.find(&kind.use_label) else {
                    continue;
                };

                let name = file_name(uri).unwrap_or_default();
                let template = format!("{}{}", policy.url_structure, name);
                let location = self.resolver.substitute(&template, self.context)?;
                *uri = Url::parse(&location)
                    .map_err(|e| FolioError::malformed_location(location.as_str(), e))?;
                rewritten += 1;
            }
        }

        tracing::debug!(rewritten, "Rewrote rendition locations");
        Ok(rewritten)
    }
}
