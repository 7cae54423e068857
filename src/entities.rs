//! # Text Spans
//!
//! A [`TextSpan`] annotates a range of plain text with rich formatting. Offsets
//! and lengths are counted in UTF-16 code units, which is what the Telegram Bot
//! API expects for `MessageEntity`.

use serde::{Deserialize, Serialize};
use teloxide::types::{MessageEntity, MessageEntityKind};

use crate::errors::{AppError, AppResult};

/// Formatting kind carried by a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
    Pre,
    TextLink,
}

/// A formatting annotation over the rewritten text.
///
/// Serializes to the wire shape `{"type": ..., "offset": ..., "length": ..., "url": ...}`
/// where `url` is only present for [`SpanKind::TextLink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Formatting kind
    #[serde(rename = "type")]
    pub kind: SpanKind,
    /// Start of the span in UTF-16 code units
    pub offset: usize,
    /// Length of the span in UTF-16 code units
    pub length: usize,
    /// Link target, only for text links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TextSpan {
    pub fn new(kind: SpanKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
        }
    }

    pub fn text_link(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::TextLink,
            offset,
            length,
            url: Some(url.into()),
        }
    }

    /// Exclusive end of the span
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Convert into the teloxide entity type used when sending messages
    ///
    /// Fails with [`AppError::Validation`] when a text link carries no url or a
    /// url that is not absolute.
    pub fn to_message_entity(&self) -> AppResult<MessageEntity> {
        let kind = match self.kind {
            SpanKind::Bold => MessageEntityKind::Bold,
            SpanKind::Italic => MessageEntityKind::Italic,
            SpanKind::Strikethrough => MessageEntityKind::Strikethrough,
            SpanKind::Underline => MessageEntityKind::Underline,
            SpanKind::Code => MessageEntityKind::Code,
            SpanKind::Pre => MessageEntityKind::Pre { language: None },
            SpanKind::TextLink => {
                let raw = self.url.as_deref().ok_or_else(|| {
                    AppError::Validation("text link span has no url".to_string())
                })?;
                let url = reqwest::Url::parse(raw).map_err(|e| {
                    AppError::Validation(format!("text link url '{}' is invalid: {}", raw, e))
                })?;
                MessageEntityKind::TextLink { url }
            }
        };
        Ok(MessageEntity::new(kind, self.offset, self.length))
    }
}

/// Convert spans to Telegram entities, skipping links whose url Telegram would reject
pub fn to_message_entities(spans: &[TextSpan]) -> Vec<MessageEntity> {
    spans
        .iter()
        .filter_map(|span| match span.to_message_entity() {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(error = %e, offset = span.offset, "Dropping span that cannot be sent");
                None
            }
        })
        .collect()
}
