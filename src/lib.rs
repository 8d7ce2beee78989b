//! tc2sc - Traditional-to-Simplified Chinese documentation converter
//!
//! This library converts the prose of Markdown/HTML documentation pages while
//! leaving code spans, tags and marked verbatim regions byte-for-byte intact.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    config::{ConverterConfig, PathRewrite},
    converter::{Converter, ZhconvConverter},
    errors::ConversionError,
    models::{BatchSummary, DocumentId, DocumentReport, Manifest, Outcome, Span, SpanKind},
};

pub use crate::processors::{
    batch::BatchDriver,
    markdown::{MarkdownProcessor, ProcessedDocument},
    segmenter::Segmenter,
    transformer::SelectiveTransformer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
