//! Splits a document into spans of convertible prose and opaque markup

use tracing::trace;

use crate::core::config::DEFAULT_MARKERS;
use crate::core::models::{Span, SpanKind};

/// Greedy, leftmost-first segmenter.
///
/// Rules are tried in priority order at every position: inline verbatim
/// region, code span, tag, then plain text, line breaks and stray brackets.
/// The resulting spans partition the input exactly.
#[derive(Debug, Clone)]
pub struct Segmenter {
    markers: Vec<String>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS.iter().copied())
    }
}

impl Segmenter {
    /// Create a segmenter recognizing the given sentinel markers.
    ///
    /// Empty markers are ignored.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether the whole document is exempt from conversion
    pub fn is_bypassed(&self, text: &str) -> bool {
        self.markers.iter().any(|m| text.starts_with(m.as_str()))
    }

    /// Segment `text` into an ordered, gap-free sequence of spans
    pub fn segment<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        if text.is_empty() {
            return Vec::new();
        }

        if self.is_bypassed(text) {
            return vec![Span::new(SpanKind::Verbatim, 0, text)];
        }

        Scanner::new(&self.markers, text).run()
    }
}

/// Concatenate spans back into document text
pub fn concat(spans: &[Span<'_>]) -> String {
    spans.iter().map(|s| s.text).collect()
}

/// Scanner state; the opening delimiter of `Verbatim`, `Code` and `Tag`
/// sits at the scanner position until the span is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Verbatim,
    Code,
    Tag,
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '`' | '<' | '>' | '\r' | '\n')
}

struct Scanner<'m, 'a> {
    markers: &'m [String],
    text: &'a str,
    pos: usize,
    spans: Vec<Span<'a>>,
}

impl<'m, 'a> Scanner<'m, 'a> {
    fn new(markers: &'m [String], text: &'a str) -> Self {
        Self {
            markers,
            text,
            pos: 0,
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Span<'a>> {
        let mut state = State::Normal;

        while self.pos < self.text.len() {
            state = match state {
                State::Normal => self.dispatch(),
                State::Verbatim => match self.close_verbatim() {
                    Some(end) => self.emit(SpanKind::Verbatim, end),
                    // An unterminated marker is read as ordinary input
                    None => self.dispatch_unmarked(),
                },
                State::Code => match self.close_delimited('`') {
                    Some(end) => self.emit(SpanKind::Code, end),
                    None => self.emit_stray(),
                },
                State::Tag => match self.close_delimited('>') {
                    Some(end) => self.emit(SpanKind::Tag, end),
                    None => self.emit_stray(),
                },
            };
        }

        trace!("Segmented {} bytes into {} spans", self.text.len(), self.spans.len());
        self.spans
    }

    fn rest(&self) -> &'a str {
        let text: &'a str = self.text;
        &text[self.pos..]
    }

    fn marker_at(&self, pos: usize) -> bool {
        let rest = &self.text[pos..];
        self.markers.iter().any(|m| rest.starts_with(m.as_str()))
    }

    fn dispatch(&mut self) -> State {
        if self.marker_at(self.pos) {
            return State::Verbatim;
        }
        self.dispatch_unmarked()
    }

    fn dispatch_unmarked(&mut self) -> State {
        match self.rest().chars().next() {
            Some('`') => State::Code,
            Some('<') => State::Tag,
            Some('>') => self.emit_stray(),
            Some('\r' | '\n') => {
                let len = self
                    .rest()
                    .find(|c: char| c != '\r' && c != '\n')
                    .unwrap_or(self.rest().len());
                self.emit(SpanKind::LineBreak, self.pos + len)
            }
            _ => {
                let end = self.text_run_end();
                self.emit(SpanKind::Text, end)
            }
        }
    }

    /// End of a plain run; always takes at least the first character
    fn text_run_end(&self) -> usize {
        for (i, c) in self.rest().char_indices() {
            if i > 0 && (is_delimiter(c) || self.marker_at(self.pos + i)) {
                return self.pos + i;
            }
        }
        self.text.len()
    }

    /// Shortest region from a marker at the scanner position to the next
    /// occurrence of the same marker, with at least one character between
    fn close_verbatim(&self) -> Option<usize> {
        let rest = self.rest();
        self.markers
            .iter()
            .filter(|m| rest.starts_with(m.as_str()))
            .find_map(|marker| {
                let body = &rest[marker.len()..];
                let first = body.chars().next()?;
                let search_from = marker.len() + first.len_utf8();
                rest[search_from..]
                    .find(marker.as_str())
                    .map(|i| self.pos + search_from + i + marker.len())
            })
    }

    /// Shortest single-line region from the (one-byte) opener at the scanner
    /// position to `close`, with at least one character between
    fn close_delimited(&self, close: char) -> Option<usize> {
        let mut chars = self.rest()[1..].char_indices();
        let (_, first) = chars.next()?;
        if first == '\n' {
            return None;
        }
        for (i, c) in chars {
            match c {
                '\n' => return None,
                c if c == close => return Some(self.pos + 1 + i + c.len_utf8()),
                _ => {}
            }
        }
        None
    }

    fn emit_stray(&mut self) -> State {
        let len = self.rest().chars().next().map_or(0, char::len_utf8);
        self.emit(SpanKind::Stray, self.pos + len)
    }

    fn emit(&mut self, kind: SpanKind, end: usize) -> State {
        let text: &'a str = self.text;
        self.spans.push(Span::new(kind, self.pos, &text[self.pos..end]));
        self.pos = end;
        State::Normal
    }
}
