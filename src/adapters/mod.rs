//! External collaborators of the export engine.
//!
//! - [`traits`] - the collaborator interfaces
//! - [`variables`] - `{token}` template substitution
//! - [`filesystem`] - rendition files on a local directory tree
//! - [`json_store`] - digital objects stored as JSON files
//!
//! # Design Pattern
//!
//! Adapters isolate everything outside the export engine behind traits, so
//! tests can swap in in-memory implementations.
//!
//! ```rust,no_run
//! use folio::adapters::{DocumentLookup, JsonDocumentStore};
//! use folio::domain::DocumentId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonDocumentStore::new("data/documents");
//! let identity = store.lookup(&DocumentId::new("42")?).await?;
//! println!("{} is a {}", identity.id, identity.base_type);
//! # Ok(())
//! # }
//! ```

pub mod filesystem;
pub mod json_store;
pub mod traits;
pub mod variables;

pub use filesystem::{extension_for_mime, FsRenditionLocator};
pub use json_store::{JsonDocumentStore, StoredDocument};
pub use traits::{DocumentLookup, RenditionLocator, TemplateResolver};
pub use variables::VariableReplacer;
