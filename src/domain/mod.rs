//! Domain models and types for Folio.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`], [`MediaUnitId`])
//! - **The export tree** ([`DocumentTree`], [`StructuralNode`], [`MediaUnit`])
//! - **Rendition policies** ([`RenditionPolicy`], [`InclusionMode`])
//! - **Template contexts** ([`DocumentContext`], [`DocumentIdentity`])
//! - **Error types** ([`FolioError`], [`TemplateError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use folio::domain::{DocumentTree, MediaUnit, MediaUnitId, RenditionKind, StructuralNode};
//! use url::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let unit = MediaUnit::new(MediaUnitId::new("PHYS_0001")?, 1).with_media_file(
//!     RenditionKind::new("LOCAL", "image/tiff"),
//!     Url::parse("file:///data/images/00000001.tif")?,
//! );
//! let root = StructuralNode::new("monograph").with_views([unit.id.clone()]);
//! let tree = DocumentTree::new(root, vec![unit]);
//! assert_eq!(tree.media_units.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod policy;
pub mod result;
pub mod tree;

// Re-export commonly used types for convenience
pub use context::{DocumentContext, DocumentIdentity};
pub use errors::{FolioError, TemplateError};
pub use ids::{DocumentId, MediaUnitId};
pub use policy::{InclusionMode, RenditionPolicies, RenditionPolicy, LOCAL_USE};
pub use result::Result;
pub use tree::{
    decoded_file_name, file_name, CrossReference, DocumentTree, MdSec, MediaUnit, MetadataEntry,
    RenditionKind, RenditionMap, StructuralNode, LOCTYPE_URL,
};
