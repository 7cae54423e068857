//! ATX heading lines (`# Title`) become bold spans.

use crate::entities::{SpanKind, TextSpan};
use crate::surrogate::is_whitespace_unit;

const HASH: u16 = b'#' as u16;
const SPACE: u16 = b' ' as u16;
const TAB: u16 = b'\t' as u16;
const CR: u16 = b'\r' as u16;
const LF: u16 = b'\n' as u16;

const MAX_HEADING_LEVEL: usize = 6;

/// Rewrite heading lines to their bare content and emit one bold span per
/// non-empty heading. Line terminators are kept exactly as they were.
pub fn extract_headings(text: &[u16]) -> (Vec<u16>, Vec<TextSpan>) {
    let mut out = Vec::with_capacity(text.len());
    let mut spans = Vec::new();

    for line in text.split_inclusive(|&unit| unit == LF) {
        let (body, terminator) = split_terminator(line);
        match heading_content(body) {
            Some(content) => {
                if !content.is_empty() {
                    spans.push(TextSpan::new(SpanKind::Bold, out.len(), content.len()));
                }
                out.extend_from_slice(content);
                out.extend_from_slice(terminator);
            }
            None => out.extend_from_slice(line),
        }
    }

    tracing::trace!(headings = spans.len(), "Heading extraction finished");
    (out, spans)
}

fn split_terminator(line: &[u16]) -> (&[u16], &[u16]) {
    let cut = if line.ends_with(&[CR, LF]) {
        line.len() - 2
    } else if line.ends_with(&[LF]) {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(cut)
}

/// Content of a heading line, or `None` when the line is not a heading.
fn heading_content(line: &[u16]) -> Option<&[u16]> {
    let level = line.iter().take_while(|&&unit| unit == HASH).count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &line[level..];
    if !matches!(rest.first(), Some(&SPACE) | Some(&TAB)) {
        return None;
    }
    // "# " with nothing after the blanks stays literal
    if rest.iter().all(|&unit| unit == SPACE || unit == TAB) {
        return None;
    }

    let rest = strip_closing_sequence(rest);
    Some(trim_whitespace(rest))
}

/// Drop a trailing run of `#` together with the blanks around it.
fn strip_closing_sequence(content: &[u16]) -> &[u16] {
    let content = trim_end_blanks(content);
    let hashes = content.iter().rev().take_while(|&&unit| unit == HASH).count();
    if hashes == 0 {
        return content;
    }
    trim_end_blanks(&content[..content.len() - hashes])
}

fn trim_end_blanks(content: &[u16]) -> &[u16] {
    let keep = content.len()
        - content
            .iter()
            .rev()
            .take_while(|&&unit| unit == SPACE || unit == TAB)
            .count();
    &content[..keep]
}

fn trim_whitespace(content: &[u16]) -> &[u16] {
    let start = content
        .iter()
        .position(|&unit| !is_whitespace_unit(unit))
        .unwrap_or(content.len());
    let end = content
        .iter()
        .rposition(|&unit| !is_whitespace_unit(unit))
        .map_or(start, |pos| pos + 1);
    &content[start..end]
}
