//! Export command implementation
//!
//! This module implements the `export` command, which transforms stored
//! documents into their export form and writes them to the output directory.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::domain::DocumentId;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
#[group(required = true, multiple = false, id = "selection")]
pub struct ExportArgs {
    /// Document ID(s) to export (comma-separated)
    #[arg(long, group = "selection")]
    pub document_id: Option<String>,

    /// Export every document in the document store
    #[arg(long, group = "selection")]
    pub all: bool,

    /// Dry run mode - transform documents without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Parses the comma-separated `--document-id` value
    fn requested_ids(&self) -> Result<Vec<DocumentId>, String> {
        let Some(ids) = &self.document_id else {
            return Ok(Vec::new());
        };

        ids.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(DocumentId::new)
            .collect()
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.storage.output_dir = output_dir.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let requested = match self.requested_ids() {
            Ok(ids) => ids,
            Err(e) => {
                eprintln!("Invalid document id: {e}");
                return Ok(2);
            }
        };

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let coordinator = match ExportCoordinator::new(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        let ids = if self.all {
            match coordinator.all_document_ids().await {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to list documents");
                    eprintln!("Failed to list documents: {e}");
                    return Ok(5);
                }
            }
        } else {
            requested
        };

        println!("🚀 Exporting {} document(s)...", ids.len());
        println!();

        let summary = match coordinator.execute_export(&ids).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        println!("📊 Export Summary:");
        println!("  Total Documents: {}", summary.total_documents);
        println!("  Successful: {}", summary.successful_exports);
        println!("  Failed: {}", summary.failed_exports);
        println!("  Renditions Added: {}", summary.renditions_added);
        println!("  Renditions Removed: {}", summary.renditions_removed);
        println!("  Links Resolved: {}", summary.links_resolved);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. Remaining documents were not exported.");
            tracing::info!("Export interrupted by user signal");
            130
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1
        };

        Ok(exit_code)
    }
}
