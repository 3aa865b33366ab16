//! Export coordinator - drives the export of many documents
//!
//! Documents are loaded from the JSON document store, transformed one after
//! another by the [`ExportOrchestrator`] and written to the output directory.
//! A failed document is recorded in the summary and never written.

use crate::adapters::{FsRenditionLocator, JsonDocumentStore, TemplateResolver, VariableReplacer};
use crate::config::FolioConfig;
use crate::core::export::orchestrator::{ExportOrchestrator, ExportRequest};
use crate::core::export::summary::{DocumentStats, ExportSummary};
use crate::domain::{DocumentId, DocumentTree, FolioError, Result};
use crate::{log_error_with_context, log_export_complete, log_export_start};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// File written for every exported document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    id: &'a DocumentId,
    exported_at: DateTime<Utc>,
    tree: &'a DocumentTree,
}

/// Export coordinator
pub struct ExportCoordinator {
    config: FolioConfig,
    store: Arc<JsonDocumentStore>,
    resolver: Arc<dyn TemplateResolver>,
    orchestrator: ExportOrchestrator,
    output_dir: PathBuf,
    dry_run: bool,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the project's rendition policies are invalid.
    pub fn new(config: FolioConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let store = Arc::new(JsonDocumentStore::new(&config.storage.documents_dir));
        let resolver: Arc<dyn TemplateResolver> = Arc::new(VariableReplacer::new());
        let orchestrator =
            ExportOrchestrator::from_project(&config.project, resolver.clone(), store.clone())?;

        Ok(Self {
            output_dir: PathBuf::from(&config.storage.output_dir),
            dry_run: config.application.dry_run,
            config,
            store,
            resolver,
            orchestrator,
            shutdown,
        })
    }

    /// Override the configured dry-run setting
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Override the configured output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Directory exported documents are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Ids of every document in the store
    pub async fn all_document_ids(&self) -> Result<Vec<DocumentId>> {
        self.store.list_ids().await
    }

    /// Execute the export
    ///
    /// Documents are exported sequentially in the given order. The shutdown
    /// signal is checked between documents; a document in progress is always
    /// finished.
    pub async fn execute_export(&self, ids: &[DocumentId]) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.total_documents = ids.len();

        tracing::info!(
            project = %self.config.project.name,
            documents = ids.len(),
            dry_run = self.dry_run,
            "Starting export process"
        );

        if !self.dry_run {
            tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
                FolioError::Storage(format!(
                    "Failed to create output directory {}: {e}",
                    self.output_dir.display()
                ))
            })?;
        }

        for id in ids {
            if *self.shutdown.borrow() {
                tracing::warn!(
                    remaining = summary.total_documents
                        - summary.successful_exports
                        - summary.failed_exports,
                    "Shutdown requested, stopping export"
                );
                summary.interrupted = true;
                break;
            }

            log_export_start!(id, &self.config.project.name);
            let document_start = Instant::now();

            match self.export_document(id).await {
                Ok(stats) => {
                    log_export_complete!(stats.renditions_added, document_start.elapsed());
                    summary.record_success(id.clone(), &stats);
                }
                Err(e) => {
                    log_error_with_context!(e, format!("Failed to export document {id}"));
                    summary.record_failure(id, &e);
                }
            }
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Load, transform and write one document
    async fn export_document(&self, id: &DocumentId) -> Result<DocumentStats> {
        let document = self.store.load(id).await?;
        let request = ExportRequest::from(document);

        let locator = FsRenditionLocator::new(
            &self.config.storage.media_root,
            self.resolver.clone(),
            request.identity.context.clone(),
        )?;

        let exported = self.orchestrator.export(request, &locator).await?;

        if self.dry_run {
            tracing::info!(document_id = %id, "Dry run, output not written");
        } else {
            self.write_output(id, &exported.tree).await?;
        }

        Ok(exported.stats)
    }

    async fn write_output(&self, id: &DocumentId, tree: &DocumentTree) -> Result<()> {
        let envelope = ExportEnvelope {
            id,
            exported_at: Utc::now(),
            tree,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let path = self.output_dir.join(format!("{}.json", id.as_str()));

        tokio::fs::write(&path, json).await.map_err(|e| {
            FolioError::Storage(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::debug!(document_id = %id, path = %path.display(), "Wrote exported document");
        Ok(())
    }
}
