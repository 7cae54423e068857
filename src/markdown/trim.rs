//! Strip surrounding whitespace and keep spans aligned with what remains.

use crate::entities::TextSpan;
use crate::surrogate::is_whitespace_unit;

/// Trim leading and trailing whitespace from `text`, adjusting `spans` in place.
///
/// Spans that end up empty or entirely inside the removed whitespace are
/// dropped; spans crossing either boundary are clamped to it. Each span is
/// handled on its own, so the surviving spans keep their relative order.
pub fn strip_text(text: Vec<u16>, spans: &mut Vec<TextSpan>) -> Vec<u16> {
    let start = text
        .iter()
        .position(|&unit| !is_whitespace_unit(unit))
        .unwrap_or(text.len());
    let end = text
        .iter()
        .rposition(|&unit| !is_whitespace_unit(unit))
        .map_or(start, |pos| pos + 1);

    let trimmed = text[start..end].to_vec();
    if spans.is_empty() {
        return trimmed;
    }

    let left_offset = start;
    let final_length = trimmed.len();

    spans.retain_mut(|span| {
        if span.length == 0 || span.end() <= left_offset {
            return false;
        }

        if span.offset >= left_offset {
            span.offset -= left_offset;
        } else {
            span.length = span.end() - left_offset;
            span.offset = 0;
        }

        if span.end() <= final_length {
            return true;
        }
        if span.offset >= final_length {
            return false;
        }
        span.length = final_length - span.offset;
        true
    });

    debug_assert!(
        spans
            .iter()
            .all(|span| span.length > 0 && span.end() <= final_length),
        "trimmed spans must stay inside the text"
    );

    trimmed
}
