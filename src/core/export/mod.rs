//! Export orchestration and coordination
//!
//! This module provides the export entry points of Folio:
//! - Single-document orchestration of the transformation steps
//! - Multi-document coordination with output writing
//! - Summary and reporting

pub mod coordinator;
pub mod orchestrator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use orchestrator::{ExportOrchestrator, ExportRequest, ExportedDocument};
pub use summary::{DocumentStats, ExportError, ExportErrorType, ExportSummary};
