//! Document-level field injection
//!
//! Writes the project's rights, provenance and technical fields into the root
//! node. Entries are always appended, so a field that already exists with the
//! same key ends up multi-valued.

use crate::adapters::TemplateResolver;
use crate::config::ProjectConfig;
use crate::domain::{DocumentContext, DocumentTree, MdSec, MetadataEntry, Result};

/// One field to inject: where it goes and the template of its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Metadata section
    pub domain: MdSec,

    /// Metadata key
    pub key: &'static str,

    /// Value template
    pub template: String,
}

impl FieldSpec {
    /// Creates a field spec
    pub fn new(domain: MdSec, key: &'static str, template: impl Into<String>) -> Self {
        Self {
            domain,
            key,
            template: template.into(),
        }
    }

    /// The fixed list of fields every export carries, sourced from the project
    pub fn project_fields(project: &ProjectConfig) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new(MdSec::RightsMd, "owner", &project.rights_owner),
            FieldSpec::new(MdSec::RightsMd, "ownerLogo", &project.rights_owner_logo),
            FieldSpec::new(MdSec::RightsMd, "ownerSiteURL", &project.rights_owner_site),
            FieldSpec::new(MdSec::RightsMd, "ownerContact", &project.rights_owner_mail),
            FieldSpec::new(
                MdSec::DigiprovMd,
                "presentation",
                &project.digiprov_presentation,
            ),
            FieldSpec::new(MdSec::DigiprovMd, "reference", &project.digiprov_reference),
            FieldSpec::new(MdSec::TechMd, "purlUrl", &project.purl),
            FieldSpec::new(MdSec::TechMd, "contentIDs", &project.content_ids),
        ]
    }
}

/// Appends one substituted metadata entry per spec to the root node
///
/// # Errors
///
/// Returns `Template` if a value template cannot be substituted.
pub fn inject_fields(
    tree: &mut DocumentTree,
    specs: &[FieldSpec],
    resolver: &dyn TemplateResolver,
    context: &DocumentContext,
) -> Result<()> {
    for spec in specs {
        let value = resolver.substitute(&spec.template, context)?;
        tree.root
            .metadata
            .push(MetadataEntry::new(spec.domain, spec.key, value));
    }

    tracing::debug!(count = specs.len(), "Injected document fields");
    Ok(())
}
