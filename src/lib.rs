// Folio - Export preparation for hierarchical digital objects
// Copyright (c) 2025 Folio Contributors
// Licensed under the MIT License

//! # Folio - Export preparation for hierarchical digital objects
//!
//! Folio prepares digitised objects (a tree of structural nodes plus per-page
//! media units) for export into an archival package.
//!
//! ## Overview
//!
//! For every document this library:
//! - **Injects** the project's rights, provenance and technical fields
//! - **Reconciles** each media unit's renditions against per-rendition
//!   inclusion modes (`none`, `if_exists`, `always`)
//! - **Rewrites** rendition locations into export URIs
//! - **Resolves** links to other documents, optionally placing the tree under
//!   its parent document
//! - **Aggregates** the media units visible below every structural node
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Transformation steps and export orchestration
//! - [`adapters`] - Template resolution, rendition lookup and the document store
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::config::load_config;
//! use folio::core::export::ExportCoordinator;
//! use folio::domain::DocumentId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("folio.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_export(&[DocumentId::new("42")?]).await?;
//!
//!     println!("Exported {} documents", summary.successful_exports);
//!     Ok(())
//! }
//! ```
//!
//! ## Single documents
//!
//! [`core::export::ExportOrchestrator`] runs the transformation on one tree
//! with caller-supplied collaborators:
//!
//! ```rust,no_run
//! use folio::adapters::{FsRenditionLocator, JsonDocumentStore, VariableReplacer};
//! use folio::config::load_config;
//! use folio::core::export::{ExportOrchestrator, ExportRequest};
//! use folio::domain::DocumentId;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("folio.toml")?;
//! let store = Arc::new(JsonDocumentStore::new(&config.storage.documents_dir));
//! let resolver = Arc::new(VariableReplacer::new());
//! let orchestrator =
//!     ExportOrchestrator::from_project(&config.project, resolver.clone(), store.clone())?;
//!
//! let document = store.load(&DocumentId::new("42")?).await?;
//! let locator = FsRenditionLocator::new(
//!     &config.storage.media_root,
//!     resolver,
//!     document.identity().context,
//! )?;
//! let exported = orchestrator.export(ExportRequest::from(document), &locator).await?;
//! println!("Root type: {}", exported.tree.root.node_type);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::FolioError`]. Template, location, lookup and locator failures
//! abort the export of the current document.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
