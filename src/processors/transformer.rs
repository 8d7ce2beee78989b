//! Applies the converter to prose spans only

use tracing::debug;

use crate::core::converter::Converter;
use crate::core::errors::Result;
use crate::core::models::Span;

/// Rebuilds a document from spans, converting only `Text` spans
pub struct SelectiveTransformer<'c> {
    converter: &'c dyn Converter,
}

impl<'c> SelectiveTransformer<'c> {
    pub fn new(converter: &'c dyn Converter) -> Self {
        Self { converter }
    }

    /// Concatenate spans in order; the first converter error aborts
    pub fn transform(&self, spans: &[Span<'_>]) -> Result<String> {
        let mut result = String::with_capacity(spans.iter().map(|s| s.text.len()).sum());
        let mut converted = 0;

        for span in spans {
            if span.kind.is_convertible() {
                result.push_str(&self.converter.convert(span.text)?);
                converted += 1;
            } else {
                result.push_str(span.text);
            }
        }

        debug!("Converted {} of {} spans", converted, spans.len());
        Ok(result)
    }
}
