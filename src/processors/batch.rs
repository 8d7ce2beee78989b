//! Manifest-ordered batch conversion

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::config::ConverterConfig;
use crate::core::converter::Converter;
use crate::core::errors::{ConversionError, Result};
use crate::core::models::{BatchSummary, DocumentId, DocumentReport, Manifest};
use crate::processors::markdown::MarkdownProcessor;

/// Converts every manifest entry from `source_root` into `dest_root`.
///
/// Reports are delivered in manifest order whatever the job count, and the
/// first failure aborts the run. Documents already written stay in place.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    processor: Arc<MarkdownProcessor>,
    source_root: PathBuf,
    dest_root: PathBuf,
    jobs: usize,
}

impl BatchDriver {
    pub fn new(
        processor: MarkdownProcessor,
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            processor: Arc::new(processor),
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            jobs: 1,
        }
    }

    /// Create from a run configuration
    pub fn from_config(config: &ConverterConfig, converter: Arc<dyn Converter>) -> Self {
        Self::new(
            MarkdownProcessor::from_config(config, converter),
            &config.source_root,
            &config.dest_root,
        )
        .with_jobs(config.jobs)
    }

    /// Number of documents processed concurrently (at least 1)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Process `manifest`, calling `on_report` once per finished entry
    pub async fn run<F>(&self, manifest: &Manifest, on_report: F) -> Result<BatchSummary>
    where
        F: FnMut(&DocumentReport),
    {
        let start_time = Instant::now();
        info!(
            "Converting {} documents from {} to {} ({} jobs)",
            manifest.len(),
            self.source_root.display(),
            self.dest_root.display(),
            self.jobs
        );

        let mut summary = if self.jobs == 1 {
            self.run_sequential(manifest, on_report).await?
        } else {
            self.run_concurrent(manifest, on_report).await?
        };

        summary.elapsed = start_time.elapsed();
        info!(
            "Completed: {} translated, {} not translated in {:?}",
            summary.translated, summary.not_translated, summary.elapsed
        );
        Ok(summary)
    }

    async fn run_sequential<F>(&self, manifest: &Manifest, mut on_report: F) -> Result<BatchSummary>
    where
        F: FnMut(&DocumentReport),
    {
        let mut summary = BatchSummary::default();
        for id in manifest {
            let report = convert_entry(
                &self.processor,
                id.clone(),
                self.source_root.clone(),
                self.dest_root.clone(),
            )
            .await?;
            summary.record(&report);
            on_report(&report);
        }
        Ok(summary)
    }

    async fn run_concurrent<F>(&self, manifest: &Manifest, mut on_report: F) -> Result<BatchSummary>
    where
        F: FnMut(&DocumentReport),
    {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let handles: Vec<JoinHandle<Result<DocumentReport>>> = manifest
            .iter()
            .map(|id| {
                let semaphore = semaphore.clone();
                let processor = self.processor.clone();
                let id = id.clone();
                let source_root = self.source_root.clone();
                let dest_root = self.dest_root.clone();
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        ConversionError::TaskError {
                            message: e.to_string(),
                        }
                    })?;
                    convert_entry(&processor, id, source_root, dest_root).await
                })
            })
            .collect();

        let mut summary = BatchSummary::default();
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ConversionError::TaskError {
                    message: e.to_string(),
                }),
            };

            match outcome {
                Ok(report) => {
                    summary.record(&report);
                    on_report(&report);
                }
                Err(e) => {
                    for rest in pending.by_ref() {
                        rest.abort();
                    }
                    return Err(e);
                }
            }
        }
        Ok(summary)
    }
}

async fn convert_entry(
    processor: &MarkdownProcessor,
    id: DocumentId,
    source_root: PathBuf,
    dest_root: PathBuf,
) -> Result<DocumentReport> {
    let source = id.resolve(&source_root);
    let destination = id.resolve(&dest_root);

    let document = processor.convert_file(&source, &destination).await?;
    debug!("{} -> {}", source.display(), destination.display());

    Ok(DocumentReport {
        id,
        source,
        destination,
        outcome: document.outcome,
        spans: document.spans,
    })
}
