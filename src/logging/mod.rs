//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use folio::logging::init_logging;
//! use folio::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document export
///
/// # Example
///
/// ```no_run
/// use folio::log_export_start;
/// use folio::domain::DocumentId;
///
/// let document_id = DocumentId::new("42").unwrap();
/// log_export_start!(&document_id, "Prints");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($document_id:expr, $project:expr) => {
        tracing::info!(
            document_id = %$document_id,
            project = %$project,
            "Starting export"
        );
    };
}

/// Log the completion of a document export
///
/// # Example
///
/// ```no_run
/// use folio::log_export_complete;
/// use std::time::Duration;
///
/// let renditions_added = 12;
/// let duration = Duration::from_millis(350);
/// log_export_complete!(renditions_added, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($renditions_added:expr, $duration:expr) => {
        tracing::info!(
            renditions_added = $renditions_added,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use folio::log_error_with_context;
/// use folio::domain::FolioError;
///
/// let error = FolioError::NotFound("42".to_string());
/// log_error_with_context!(&error, "Failed to resolve link");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{DocumentId, FolioError};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let id = DocumentId::new("42").unwrap();
        log_export_start!(&id, "Prints");
        log_export_complete!(3usize, Duration::from_millis(10));
        log_error_with_context!(FolioError::NotFound("42".into()), format!("document {id}"));
    }
}
