//! Core business logic for Folio.
//!
//! # Modules
//!
//! - [`transform`] - The export-time tree transformations
//! - [`export`] - Single-document orchestration and multi-document coordination
//!
//! # Export Workflow
//!
//! For every document:
//!
//! 1. **Load**: Read the stored document from the document store
//! 2. **Inject fields**: Append the project's rights, provenance and technical fields
//! 3. **Reconcile**: Add and remove renditions per the project's inclusion modes
//! 4. **Rewrite locations**: Point renditions at their export locations
//! 5. **Resolve links**: Resolve cross-document references, then link to the parent
//! 6. **Aggregate views**: Merge view sets bottom-up
//! 7. **Write**: Store the exported tree in the output directory
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::config::load_config;
//! use folio::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("folio.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//! let ids = coordinator.all_document_ids().await?;
//! let summary = coordinator.execute_export(&ids).await?;
//!
//! println!("Successful: {}", summary.successful_exports);
//! println!("Failed: {}", summary.failed_exports);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
