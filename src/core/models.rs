//! Core data models for document conversion

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::core::errors::{ConversionError, Result};

/// Processing classification of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Region between two identical sentinel markers, or a whole bypassed document
    Verbatim,
    /// Backtick-delimited code on a single line
    Code,
    /// `<...>` on a single line
    Tag,
    /// Prose eligible for conversion
    Text,
    /// Run of `\r` / `\n`
    LineBreak,
    /// Lone `` ` ``, `<` or `>` that did not delimit anything
    Stray,
}

impl SpanKind {
    /// Whether spans of this kind are sent to the converter
    pub fn is_convertible(self) -> bool {
        matches!(self, SpanKind::Text)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::Verbatim => write!(f, "verbatim"),
            SpanKind::Code => write!(f, "code"),
            SpanKind::Tag => write!(f, "tag"),
            SpanKind::Text => write!(f, "text"),
            SpanKind::LineBreak => write!(f, "line-break"),
            SpanKind::Stray => write!(f, "stray"),
        }
    }
}

/// A contiguous, classified slice of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    /// Byte offset of the span in the document
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Span<'a> {
    pub fn new(kind: SpanKind, start: usize, text: &'a str) -> Self {
        Self { kind, start, text }
    }

    /// Byte offset one past the end of the span
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Root-relative identifier of a document, e.g. `/docs/faq.md`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Parse and validate an identifier.
    ///
    /// Identifiers must start with `/` and may not climb out of the root.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let relative = id.strip_prefix('/').unwrap_or("");
        let escapes = Path::new(relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if !id.starts_with('/') || relative.is_empty() || relative.ends_with('/') || escapes {
            return Err(ConversionError::InvalidDocumentId { id });
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier without its leading `/`
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    /// Concrete location of this document under `root`
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.relative())
    }
}

impl TryFrom<String> for DocumentId {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of documents processed in one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<DocumentId>,
}

impl Manifest {
    pub fn new(entries: Vec<DocumentId>) -> Self {
        Self { entries }
    }

    /// Build a manifest from raw identifiers, validating each one
    pub fn parse<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = ids
            .into_iter()
            .map(DocumentId::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentId> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a DocumentId;
    type IntoIter = std::slice::Iter<'a, DocumentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whether a document went through the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Translated,
    /// Whole-document bypass: the document started with a sentinel marker
    NotTranslated,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Translated => write!(f, "translated"),
            Outcome::NotTranslated => write!(f, "not translated"),
        }
    }
}

/// Result of processing one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub id: DocumentId,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: Outcome,
    /// Number of spans the segmenter produced
    pub spans: usize,
}

impl DocumentReport {
    /// Status line printed for each manifest entry
    pub fn status_line(&self) -> String {
        format!("{} {}.", self.id, self.outcome)
    }
}

/// Totals for a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub translated: usize,
    pub not_translated: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn record(&mut self, report: &DocumentReport) {
        match report.outcome {
            Outcome::Translated => self.translated += 1,
            Outcome::NotTranslated => self.not_translated += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.translated + self.not_translated
    }
}
