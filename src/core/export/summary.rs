//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{DocumentId, FolioError};
use std::time::Duration;

/// Counters reported by the export of a single document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Fields appended to the root node
    pub fields_injected: usize,

    /// Media units that were reconciled
    pub units_reconciled: usize,

    /// Media units skipped for lack of a canonical stem
    pub units_skipped: usize,

    /// Renditions added by reconciliation
    pub renditions_added: usize,

    /// Renditions removed by reconciliation
    pub renditions_removed: usize,

    /// Rendition URIs rewritten to export locations
    pub locations_rewritten: usize,

    /// Cross-document links resolved, including the parent link
    pub links_resolved: usize,

    /// Whether the tree was re-linked under its parent document
    pub parent_linked: bool,
}

/// Summary of an export run over many documents
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Total number of documents requested
    pub total_documents: usize,

    /// Number of documents exported
    pub successful_exports: usize,

    /// Number of documents whose export failed
    pub failed_exports: usize,

    /// Renditions added across all exported documents
    pub renditions_added: usize,

    /// Renditions removed across all exported documents
    pub renditions_removed: usize,

    /// Cross-document links resolved across all exported documents
    pub links_resolved: usize,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,

    /// Ids of the documents that were exported
    pub exported_documents: Vec<DocumentId>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_documents: 0,
            successful_exports: 0,
            failed_exports: 0,
            renditions_added: 0,
            renditions_removed: 0,
            links_resolved: 0,
            interrupted: false,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            exported_documents: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Record a successfully exported document
    pub fn record_success(&mut self, id: DocumentId, stats: &DocumentStats) {
        self.successful_exports += 1;
        self.renditions_added += stats.renditions_added;
        self.renditions_removed += stats.renditions_removed;
        self.links_resolved += stats.links_resolved;
        self.exported_documents.push(id);
    }

    /// Record a failed document
    pub fn record_failure(&mut self, id: &DocumentId, error: &FolioError) {
        self.failed_exports += 1;
        self.add_error(ExportError::from_folio(error).with_context(format!("document_id={id}")));
    }

    /// Check if the export was successful (no failures, not interrupted)
    pub fn is_successful(&self) -> bool {
        self.failed_exports == 0 && self.errors.is_empty() && !self.interrupted
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_documents == 0 {
            return 100.0;
        }
        (self.successful_exports as f64 / self.total_documents as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_documents = self.total_documents,
            successful = self.successful_exports,
            failed = self.failed_exports,
            renditions_added = self.renditions_added,
            renditions_removed = self.renditions_removed,
            links_resolved = self.links_resolved,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Template substitution failed
    Template,
    /// A rewritten or resolved location is not a valid URI
    Location,
    /// A document or link target does not exist
    NotFound,
    /// The rendition locator failed
    Locator,
    /// Reading or writing documents failed
    Storage,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., document id)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Classify a library error
    pub fn from_folio(error: &FolioError) -> Self {
        let error_type = match error {
            FolioError::Template(_) => ExportErrorType::Template,
            FolioError::MalformedLocation { .. } => ExportErrorType::Location,
            FolioError::NotFound(_) => ExportErrorType::NotFound,
            FolioError::LocatorIo(_) => ExportErrorType::Locator,
            FolioError::Storage(_) | FolioError::Serialization(_) | FolioError::Io(_) => {
                ExportErrorType::Storage
            }
            FolioError::Configuration(_) => ExportErrorType::Configuration,
            FolioError::Validation(_) => ExportErrorType::Unknown,
        };
        Self::new(error_type, error.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateError;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.total_documents, 0);
        assert_eq!(summary.successful_exports, 0);
        assert_eq!(summary.failed_exports, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(!summary.interrupted);
        assert!(summary.errors.is_empty());
        assert!(summary.exported_documents.is_empty());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new();
        summary.total_documents = 2;
        summary.successful_exports = 2;
        assert!(summary.is_successful());

        summary.interrupted = true;
        assert!(!summary.is_successful());

        summary.interrupted = false;
        summary.failed_exports = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_summary_success_rate() {
        let mut summary = ExportSummary::new();
        summary.total_documents = 4;
        summary.successful_exports = 3;

        assert_eq!(summary.success_rate(), 75.0);

        summary.total_documents = 0;
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_record_success_accumulates_stats() {
        let mut summary = ExportSummary::new();
        let stats = DocumentStats {
            renditions_added: 2,
            renditions_removed: 1,
            links_resolved: 3,
            ..DocumentStats::default()
        };

        summary.record_success(DocumentId::new("1").unwrap(), &stats);
        summary.record_success(DocumentId::new("2").unwrap(), &stats);

        assert_eq!(summary.successful_exports, 2);
        assert_eq!(summary.renditions_added, 4);
        assert_eq!(summary.renditions_removed, 2);
        assert_eq!(summary.links_resolved, 6);
        assert_eq!(summary.exported_documents.len(), 2);
    }

    #[test]
    fn test_record_failure_classifies_error() {
        let mut summary = ExportSummary::new();
        let error = FolioError::Template(TemplateError::UnresolvableToken {
            token: "owner".to_string(),
            template: "{owner}".to_string(),
        });

        summary.record_failure(&DocumentId::new("42").unwrap(), &error);

        assert_eq!(summary.failed_exports, 1);
        assert_eq!(summary.errors[0].error_type, ExportErrorType::Template);
        assert_eq!(summary.errors[0].context.as_deref(), Some("document_id=42"));
    }

    #[test]
    fn test_export_error_classification() {
        let cases = [
            (FolioError::NotFound("7".into()), ExportErrorType::NotFound),
            (FolioError::LocatorIo("disk".into()), ExportErrorType::Locator),
            (
                FolioError::malformed_location("x", "relative URL without a base"),
                ExportErrorType::Location,
            ),
            (FolioError::Io("denied".into()), ExportErrorType::Storage),
        ];

        for (error, expected) in cases {
            assert_eq!(ExportError::from_folio(&error).error_type, expected);
        }
    }
}
