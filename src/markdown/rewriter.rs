//! Single forward scan that removes markup and records spans.
//!
//! Every removal shortens the text, so spans recorded earlier are adjusted on
//! the spot. The adjustment only ever touches `length`; offsets of spans that
//! begin after the edit point are left where they are. Headings are the only
//! source of such spans and the trim pass clamps whatever ends up past the
//! final text.
//!
//! Known limitation: a heading that follows removed markup keeps its offset,
//! so its bold ends up to the right of the heading text. Trim clamps it, or
//! drops it once it lies past the end of the text.

use regex::Regex;
use tracing::trace;

use super::delimiters::{find_units, DelimiterTable};
use crate::entities::TextSpan;
use crate::surrogate::{self, is_low_surrogate};

/// Scan `text` left to right, replacing paired delimiters and inline links
/// with their content. `spans` may be pre-seeded (heading spans).
pub(crate) fn rewrite(
    mut text: Vec<u16>,
    mut spans: Vec<TextSpan>,
    delimiters: &DelimiterTable,
    link_pattern: Option<&Regex>,
) -> (Vec<u16>, Vec<TextSpan>) {
    // decoded view for the link pattern, rebuilt lazily after each edit
    let mut decoded: Option<DecodedText> = None;
    let mut i = 0;
    while i < text.len() {
        if let Some(delimiter) = delimiters.match_at(&text, i) {
            let marker = delimiter.units();
            let kind = delimiter.kind();
            let len = marker.len();

            // Start one past the opener so "****" never closes on itself
            match find_units(&text, marker, i + len + 1) {
                Some(end) => {
                    text.drain(end..end + len);
                    text.drain(i..i + len);
                    shrink_for_delimiter(&mut spans, i, len);
                    decoded = None;
                    spans.push(TextSpan::new(kind, i, end - i - len));
                    trace!(?kind, offset = i, length = end - i - len, "Delimiter pair resolved");
                    // the text moved left under `i`, look at the same position again
                }
                None => i += len,
            }
            continue;
        }

        if let Some(pattern) = link_pattern {
            let view = decoded.get_or_insert_with(|| DecodedText::new(&text));
            if let Some(link) = match_link(pattern, view, &text, i) {
                let label_len = link.label.len();
                let delta = link.matched_len - label_len;
                text.splice(i..i + link.matched_len, link.label);
                shrink_for_link(&mut spans, i, delta);
                decoded = None;
                spans.push(TextSpan::text_link(i, label_len, link.url));
                trace!(offset = i, length = label_len, "Inline link resolved");
                i += label_len;
                continue;
            }
        }

        i += 1;
    }

    (text, spans)
}

/// Length adjustment after a delimiter pair opening at `at` was removed.
///
/// A span that starts at or before `at` and ends after it lost both markers;
/// a span that starts after `at` only loses the width of one marker.
pub(crate) fn shrink_for_delimiter(spans: &mut [TextSpan], at: usize, marker_len: usize) {
    for span in spans.iter_mut() {
        if span.end() > at {
            let removed = if span.offset <= at {
                marker_len * 2
            } else {
                marker_len
            };
            span.length = span.length.saturating_sub(removed);
        }
    }
}

/// Length adjustment after a link match starting at `at` shrank by `delta` units.
pub(crate) fn shrink_for_link(spans: &mut [TextSpan], at: usize, delta: usize) {
    for span in spans.iter_mut() {
        if span.end() > at {
            span.length = span.length.saturating_sub(delta);
        }
    }
}

/// The working text as a `String`, with the byte offset of every unit.
struct DecodedText {
    text: String,
    byte_offsets: Vec<usize>,
}

impl DecodedText {
    fn new(units: &[u16]) -> Self {
        let mut text = String::with_capacity(units.len());
        let mut byte_offsets = Vec::with_capacity(units.len() + 1);
        for decoded in char::decode_utf16(units.iter().copied()) {
            // a lone surrogate is one unit wide and decodes to U+FFFD
            let (ch, width) = match decoded {
                Ok(ch) => (ch, ch.len_utf16()),
                Err(_) => (char::REPLACEMENT_CHARACTER, 1),
            };
            for _ in 0..width {
                byte_offsets.push(text.len());
            }
            text.push(ch);
        }
        byte_offsets.push(text.len());
        Self { text, byte_offsets }
    }

    /// Everything from unit `at` on. `at` must not split a surrogate pair.
    fn suffix(&self, at: usize) -> &str {
        &self.text[self.byte_offsets[at]..]
    }
}

struct LinkMatch {
    label: Vec<u16>,
    url: String,
    matched_len: usize,
}

/// Try the (anchored) link pattern at position `i`.
fn match_link(
    pattern: &Regex,
    decoded: &DecodedText,
    text: &[u16],
    i: usize,
) -> Option<LinkMatch> {
    // a match can never begin in the middle of a surrogate pair
    if is_low_surrogate(text[i]) {
        return None;
    }

    let captures = pattern.captures(decoded.suffix(i))?;
    let whole = captures.get(0)?;
    if whole.start() != 0 || whole.as_str().is_empty() {
        return None;
    }

    let label = captures.get(1).map_or("", |m| m.as_str());
    let url = captures.get(2).map_or("", |m| m.as_str());

    Some(LinkMatch {
        label: surrogate::encode(label),
        url: url.to_string(),
        matched_len: surrogate::utf16_len(whole.as_str()),
    })
}
