//! # Markdown Entity Extraction
//!
//! Turns lightweight markup in bot replies into plain text plus Telegram
//! formatting spans:
//!
//! - `**bold**`, `__italic__`, `~~strike~~`, `--underline--`, `` `code` ``
//!   and ```` ```pre``` ```` pairs, configurable through [`DelimiterTable`]
//! - inline links `[label](url)`, configurable through a two-group regex
//! - optional `# Heading` lines, rendered as bold
//!
//! All offsets are UTF-16 code units. The work happens in three passes over
//! the encoded text: [`headings::extract_headings`] (when enabled), the
//! delimiter/link rewrite, and [`trim::strip_text`].
//!
//! ```rust
//! use sophie_bot::markdown::extract_markdown_entities;
//! use sophie_bot::entities::{SpanKind, TextSpan};
//!
//! let (text, spans) = extract_markdown_entities("Hello **world**!", false);
//! assert_eq!(text, "Hello world!");
//! assert_eq!(spans, vec![TextSpan::new(SpanKind::Bold, 6, 5)]);
//! ```

pub mod delimiters;
pub mod headings;
mod rewriter;
pub mod trim;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::config::FormattingConfig;
use crate::entities::TextSpan;
use crate::errors::{AppError, AppResult};
use crate::surrogate;

pub use delimiters::{Delimiter, DelimiterTable};
pub use headings::extract_headings;
pub use trim::strip_text;

/// Default inline link syntax: `[label](url)`
pub const DEFAULT_LINK_PATTERN: &str = r"\[([\S\s]+?)\]\((.+?)\)";

lazy_static! {
    static ref DEFAULT_LINK_REGEX: Regex = Regex::new(&anchor(DEFAULT_LINK_PATTERN))
        .expect("Default link pattern should be valid");
    static ref DEFAULT_PARSER: MarkdownParser = MarkdownParser::new();
    static ref DEFAULT_HEADINGS_PARSER: MarkdownParser =
        MarkdownParser::new().extract_headings(true);
}

fn anchor(pattern: &str) -> String {
    format!(r"\A(?:{})", pattern)
}

/// Compile a caller-supplied link pattern.
///
/// The pattern must expose exactly two capture groups: the visible label and
/// the url, in that order.
pub fn compile_link_pattern(pattern: &str) -> AppResult<Regex> {
    let regex = Regex::new(&anchor(pattern))?;
    // group 0 is the whole match
    if regex.captures_len() != 3 {
        return Err(AppError::Config(format!(
            "link pattern '{}' must have exactly two capture groups (label, url), found {}",
            pattern,
            regex.captures_len() - 1
        )));
    }
    Ok(regex)
}

/// Configured markdown-to-entities converter.
///
/// A parser holds no per-call state, so one instance can be shared between
/// handlers.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    delimiters: DelimiterTable,
    link_pattern: Option<Regex>,
    extract_headings: bool,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Parser with the default delimiters and link syntax, headings disabled
    pub fn new() -> Self {
        Self {
            delimiters: DelimiterTable::default(),
            link_pattern: Some(DEFAULT_LINK_REGEX.clone()),
            extract_headings: false,
        }
    }

    /// Build a parser from the formatting section of the app configuration
    pub fn from_config(config: &FormattingConfig) -> AppResult<Self> {
        let parser = Self::new().extract_headings(config.extract_headings);
        match &config.link_pattern {
            Some(pattern) => parser.with_link_pattern(pattern),
            None => Ok(parser),
        }
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterTable) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Replace the link syntax. See [`compile_link_pattern`].
    pub fn with_link_pattern(mut self, pattern: &str) -> AppResult<Self> {
        self.link_pattern = Some(compile_link_pattern(pattern)?);
        Ok(self)
    }

    /// Disable inline link recognition
    pub fn without_links(mut self) -> Self {
        self.link_pattern = None;
        self
    }

    pub fn extract_headings(mut self, enabled: bool) -> Self {
        self.extract_headings = enabled;
        self
    }

    pub fn delimiters(&self) -> &DelimiterTable {
        &self.delimiters
    }

    pub fn headings_enabled(&self) -> bool {
        self.extract_headings
    }

    /// Strip markup from `text` and return the plain text with its spans.
    ///
    /// Spans are listed in the order their closing markup was found, not by
    /// position. Unmatched markers stay in the text as they are.
    pub fn parse(&self, text: &str) -> (String, Vec<TextSpan>) {
        if text.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut units = surrogate::encode(text);
        let mut spans = Vec::new();
        if self.extract_headings {
            let (rewritten, heading_spans) = headings::extract_headings(&units);
            units = rewritten;
            spans = heading_spans;
        }

        let (units, mut spans) =
            rewriter::rewrite(units, spans, &self.delimiters, self.link_pattern.as_ref());
        let units = trim::strip_text(units, &mut spans);

        debug!(
            input_units = surrogate::utf16_len(text),
            output_units = units.len(),
            spans = spans.len(),
            "Markdown entities extracted"
        );

        (surrogate::decode(&units), spans)
    }
}

/// Parse with the default delimiters and link syntax.
pub fn extract_markdown_entities(text: &str, extract_headings: bool) -> (String, Vec<TextSpan>) {
    if extract_headings {
        DEFAULT_HEADINGS_PARSER.parse(text)
    } else {
        DEFAULT_PARSER.parse(text)
    }
}
