//! Formatter shared by the bot handlers: template expansion followed by
//! markdown entity extraction.

use std::time::Instant;

use teloxide::types::MessageEntity;

use crate::config::FormattingConfig;
use crate::entities::{to_message_entities, TextSpan};
use crate::errors::{AppError, AppResult};
use crate::markdown::MarkdownParser;
use crate::observability;
use crate::random_text::{parse_random_text, Chooser, RandomChooser};

/// Plain text with its formatting spans, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedText {
    pub text: String,
    pub spans: Vec<TextSpan>,
}

impl FormattedText {
    /// Spans as Telegram entities
    pub fn entities(&self) -> Vec<MessageEntity> {
        to_message_entities(&self.spans)
    }

    /// Spans in their JSON wire form
    pub fn spans_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.spans)
            .map_err(|e| AppError::Internal(format!("failed to serialize spans: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    parser: MarkdownParser,
    expand_random: bool,
}

impl Formatter {
    pub fn new(parser: MarkdownParser, expand_random: bool) -> Self {
        Self {
            parser,
            expand_random,
        }
    }

    pub fn from_config(config: &FormattingConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::new(
            MarkdownParser::from_config(config)?,
            config.expand_random,
        ))
    }

    /// Format with random section selection
    pub fn format(&self, text: &str) -> FormattedText {
        self.format_with(text, &mut RandomChooser::new())
    }

    /// Format using the given selection strategy for `%%%` sections
    pub fn format_with<C>(&self, text: &str, chooser: &mut C) -> FormattedText
    where
        C: Chooser + ?Sized,
    {
        let start = Instant::now();
        let expanded = if self.expand_random {
            parse_random_text(text, chooser)
        } else {
            text.to_string()
        };
        let (text, spans) = self.parser.parse(&expanded);
        observability::record_format_metrics(&spans, start.elapsed());
        FormattedText { text, spans }
    }
}
