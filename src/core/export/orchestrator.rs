//! Single-document export orchestration
//!
//! Runs the transformation steps on one document tree strictly in order:
//! field injection, rendition reconciliation, location rewriting, link
//! resolution, the optional parent re-link and finally view aggregation.

use super::summary::DocumentStats;
use crate::adapters::{DocumentLookup, RenditionLocator, StoredDocument, TemplateResolver};
use crate::config::ProjectConfig;
use crate::core::transform::{
    aggregate_views, inject_fields, FieldSpec, LinkResolver, LocationRewriter, VariantReconciler,
};
use crate::domain::{DocumentId, DocumentIdentity, DocumentTree, RenditionPolicies, Result};
use std::sync::Arc;

/// One document handed to the orchestrator
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Identity and template context of the exported document
    pub identity: DocumentIdentity,

    /// Parent document to link the tree under, if any
    pub parent: Option<DocumentId>,

    /// The tree to transform
    pub tree: DocumentTree,
}

impl From<StoredDocument> for ExportRequest {
    fn from(document: StoredDocument) -> Self {
        let identity = document.identity();
        Self {
            identity,
            parent: document.parent,
            tree: document.tree,
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// Transformed tree. Its root differs from the input root after a parent
    /// re-link.
    pub tree: DocumentTree,

    /// What the export changed
    pub stats: DocumentStats,
}

/// Sequences the export transformation for one document at a time
pub struct ExportOrchestrator {
    policies: RenditionPolicies,
    field_specs: Vec<FieldSpec>,
    pointer_path: String,
    resolver: Arc<dyn TemplateResolver>,
    lookup: Arc<dyn DocumentLookup>,
}

impl ExportOrchestrator {
    /// Create an orchestrator from its parts
    pub fn new(
        policies: RenditionPolicies,
        field_specs: Vec<FieldSpec>,
        pointer_path: impl Into<String>,
        resolver: Arc<dyn TemplateResolver>,
        lookup: Arc<dyn DocumentLookup>,
    ) -> Self {
        Self {
            policies,
            field_specs,
            pointer_path: pointer_path.into(),
            resolver,
            lookup,
        }
    }

    /// Create an orchestrator for a configured project
    pub fn from_project(
        project: &ProjectConfig,
        resolver: Arc<dyn TemplateResolver>,
        lookup: Arc<dyn DocumentLookup>,
    ) -> Result<Self> {
        Ok(Self::new(
            project.rendition_policies()?,
            FieldSpec::project_fields(project),
            project.pointer_path.clone(),
            resolver,
            lookup,
        ))
    }

    /// The project's rendition policies
    pub fn policies(&self) -> &RenditionPolicies {
        &self.policies
    }

    /// Export one document
    ///
    /// The locator is scoped to the document being exported, so it is passed
    /// per call.
    ///
    /// # Errors
    ///
    /// Any error aborts the export. The request's tree is consumed either way.
    pub async fn export(
        &self,
        request: ExportRequest,
        locator: &dyn RenditionLocator,
    ) -> Result<ExportedDocument> {
        let ExportRequest {
            identity,
            parent,
            mut tree,
        } = request;
        let context = &identity.context;
        let resolver = self.resolver.as_ref();
        let mut stats = DocumentStats::default();

        inject_fields(&mut tree, &self.field_specs, resolver, context)?;
        stats.fields_injected = self.field_specs.len();

        let reconciled = VariantReconciler::new(&self.policies, locator).reconcile_all(&mut tree)?;
        stats.units_reconciled = reconciled.units_reconciled;
        stats.units_skipped = reconciled.units_skipped;
        stats.renditions_added = reconciled.renditions_added;
        stats.renditions_removed = reconciled.renditions_removed;

        stats.locations_rewritten =
            LocationRewriter::new(&self.policies, resolver, context).rewrite_locations(&mut tree)?;

        let links = LinkResolver::new(self.lookup.as_ref(), resolver, &self.pointer_path);
        stats.links_resolved = links.resolve_links(&mut tree.root).await?;

        if let Some(parent) = &parent {
            let root = std::mem::take(&mut tree.root);
            tree.root = links.relink_parent(root, parent).await?;
            stats.links_resolved += 1;
            stats.parent_linked = true;
        }

        aggregate_views(&mut tree.root);

        tracing::debug!(
            document_id = %identity.id,
            fields = stats.fields_injected,
            renditions_added = stats.renditions_added,
            renditions_removed = stats.renditions_removed,
            links = stats.links_resolved,
            "Document transformed"
        );

        Ok(ExportedDocument { tree, stats })
    }
}
