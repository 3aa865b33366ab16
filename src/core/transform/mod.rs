//! Export-time tree transformations
//!
//! Each step mutates one [`DocumentTree`](crate::domain::DocumentTree) in
//! place and is run by the export orchestrator in a fixed order:
//!
//! 1. [`fields`] appends the project's document-level fields to the root
//! 2. [`reconcile`] adds and removes renditions per media unit
//! 3. [`locations`] rewrites the surviving renditions' URIs
//! 4. [`links`] resolves cross-document references, then optionally re-links
//!    the tree under its parent document
//! 5. [`views`] merges view sets bottom-up
//!
//! Any error aborts the export of the document. The tree is then partially
//! mutated and must be discarded.

pub mod fields;
pub mod links;
pub mod locations;
pub mod reconcile;
pub mod views;

pub use fields::{inject_fields, FieldSpec};
pub use links::LinkResolver;
pub use locations::LocationRewriter;
pub use reconcile::{ReconcileOutcome, ReconcileStats, VariantReconciler};
pub use views::aggregate_views;
