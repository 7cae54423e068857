//! # Test Helper Library
//!
//! Shared assertions for the formatting integration tests.

#![allow(dead_code)]

use sophie_bot::surrogate::utf16_len;
use sophie_bot::TextSpan;

/// Assert that every span is non-empty and lies inside `text` (UTF-16 units)
pub fn assert_spans_valid(text: &str, spans: &[TextSpan]) {
    let len = utf16_len(text);
    for span in spans {
        assert!(span.length > 0, "empty span {:?} in {:?}", span, text);
        assert!(
            span.offset + span.length <= len,
            "span {:?} exceeds text {:?} ({} units)",
            span,
            text,
            len
        );
    }
}

/// The text covered by a span, for readable assertions
pub fn covered(text: &str, span: &TextSpan) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    String::from_utf16_lossy(&units[span.offset..span.offset + span.length])
}
