//! Delimiter table used by the entity rewriter.

use crate::entities::SpanKind;
use crate::errors::{AppError, AppResult};

/// A paired marker and the span kind it produces
#[derive(Debug, Clone, PartialEq)]
pub struct Delimiter {
    marker: String,
    units: Vec<u16>,
    kind: SpanKind,
}

impl Delimiter {
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub(crate) fn units(&self) -> &[u16] {
        &self.units
    }
}

/// Ordered marker table, longest marker first.
///
/// Ordering by length keeps "```" from being read as three "`" markers.
/// Markers of equal length keep their alphabetical order so that matching is
/// deterministic regardless of how the caller built the table.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimiterTable {
    entries: Vec<Delimiter>,
}

impl DelimiterTable {
    /// Build a table from `(marker, kind)` pairs.
    ///
    /// A marker listed twice keeps the kind of its last occurrence. Empty
    /// markers are rejected since they would match at every position.
    pub fn new<I, S>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (S, SpanKind)>,
        S: Into<String>,
    {
        let mut table: Vec<Delimiter> = Vec::new();
        for (marker, kind) in entries {
            let marker = marker.into();
            if marker.is_empty() {
                return Err(AppError::Config(
                    "delimiter markers cannot be empty".to_string(),
                ));
            }
            match table.iter_mut().find(|d| d.marker == marker) {
                Some(existing) => existing.kind = kind,
                None => table.push(Delimiter {
                    units: marker.encode_utf16().collect(),
                    marker,
                    kind,
                }),
            }
        }

        table.sort_by(|a, b| {
            b.units
                .len()
                .cmp(&a.units.len())
                .then_with(|| a.marker.cmp(&b.marker))
        });

        Ok(Self { entries: table })
    }

    /// A table with no markers; only links are recognized.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Delimiter> {
        self.entries.iter()
    }

    /// Longest marker that starts at `pos`
    pub(crate) fn match_at(&self, text: &[u16], pos: usize) -> Option<&Delimiter> {
        let rest = text.get(pos..)?;
        self.entries.iter().find(|d| rest.starts_with(&d.units))
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self {
            entries: vec![
                delimiter("```", SpanKind::Pre),
                delimiter("**", SpanKind::Bold),
                delimiter("--", SpanKind::Underline),
                delimiter("__", SpanKind::Italic),
                delimiter("~~", SpanKind::Strikethrough),
                delimiter("`", SpanKind::Code),
            ],
        }
    }
}

fn delimiter(marker: &str, kind: SpanKind) -> Delimiter {
    Delimiter {
        marker: marker.to_string(),
        units: marker.encode_utf16().collect(),
        kind,
    }
}

/// First occurrence of `needle` in `haystack` at or after `from`
pub(crate) fn find_units(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}
