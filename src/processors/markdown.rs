//! Markdown document processor that converts prose and preserves markup

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::core::config::{ConverterConfig, PathRewrite};
use crate::core::converter::Converter;
use crate::core::errors::{ConversionError, Result};
use crate::core::models::Outcome;
use crate::processors::segmenter::Segmenter;
use crate::processors::transformer::SelectiveTransformer;

/// A fully processed document, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub text: String,
    pub outcome: Outcome,
    pub spans: usize,
}

/// Per-document pipeline: bypass check, segmentation, selective
/// conversion and path rewrite
#[derive(Clone)]
pub struct MarkdownProcessor {
    converter: Arc<dyn Converter>,
    segmenter: Segmenter,
    path_rewrite: PathRewrite,
}

impl fmt::Debug for MarkdownProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownProcessor")
            .field("segmenter", &self.segmenter)
            .field("path_rewrite", &self.path_rewrite)
            .finish_non_exhaustive()
    }
}

impl MarkdownProcessor {
    /// Create a new markdown processor
    pub fn new(
        converter: Arc<dyn Converter>,
        segmenter: Segmenter,
        path_rewrite: PathRewrite,
    ) -> Self {
        Self {
            converter,
            segmenter,
            path_rewrite,
        }
    }

    /// Create from a run configuration
    pub fn from_config(config: &ConverterConfig, converter: Arc<dyn Converter>) -> Self {
        Self::new(
            converter,
            Segmenter::new(config.markers.iter().cloned()),
            config.path_rewrite.clone(),
        )
    }

    /// Convert document text
    pub fn process(&self, content: &str) -> Result<ProcessedDocument> {
        let (converted, outcome, spans) = if self.segmenter.is_bypassed(content) {
            (content.to_string(), Outcome::NotTranslated, 1)
        } else {
            let spans = self.segmenter.segment(content);
            let converted = SelectiveTransformer::new(self.converter.as_ref()).transform(&spans)?;
            (converted, Outcome::Translated, spans.len())
        };

        Ok(ProcessedDocument {
            text: self.path_rewrite.apply(&converted),
            outcome,
            spans,
        })
    }

    /// Convert a single file, creating the output's parent directories
    pub async fn convert_file(&self, input: &Path, output: &Path) -> Result<ProcessedDocument> {
        debug!("Converting: {}", input.display());

        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| ConversionError::file(input, e))?;

        let document = self.process(&content)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ConversionError::file(parent, e))?;
            }
        }

        tokio::fs::write(output, &document.text)
            .await
            .map_err(|e| ConversionError::file(output, e))?;

        debug!(
            "Wrote {} ({}, {} spans)",
            output.display(),
            document.outcome,
            document.spans
        );
        Ok(document)
    }
}
