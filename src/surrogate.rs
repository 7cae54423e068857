//! # Surrogate Text Codec
//!
//! Telegram addresses message entities in UTF-16 code units. All offset
//! bookkeeping in [`crate::markdown`] happens on a `Vec<u16>` ("surrogate
//! text") so that one element is exactly one unit of the wire addressing.
//! Characters outside the Basic Multilingual Plane take two elements.

/// Encode text into UTF-16 code units.
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16 code units back into text.
///
/// Unpaired surrogates never cause a failure; each one is replaced with
/// U+FFFD because a Rust `String` cannot hold it.
pub fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// True for the second half of a surrogate pair.
pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Whitespace test for a single code unit. Surrogate halves are never whitespace.
pub(crate) fn is_whitespace_unit(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmp_passes_through() {
        assert_eq!(encode("abc"), vec![0x61, 0x62, 0x63]);
        assert_eq!(utf16_len("привет"), 6);
    }

    #[test]
    fn test_astral_characters_take_two_units() {
        let units = encode("😀");
        assert_eq!(units, vec![0xD83D, 0xDE00]);
        assert!(is_low_surrogate(units[1]));
        assert!(!is_low_surrogate(units[0]));
        assert_eq!(decode(&units), "😀");
    }

    #[test]
    fn test_lone_surrogate_does_not_panic() {
        assert_eq!(decode(&[0x61, 0xD83D]), "a\u{FFFD}");
    }

    #[test]
    fn test_whitespace_units() {
        assert!(is_whitespace_unit(u16::from(b' ')));
        assert!(is_whitespace_unit(u16::from(b'\n')));
        assert!(is_whitespace_unit(0x00A0));
        assert!(!is_whitespace_unit(u16::from(b'x')));
        assert!(!is_whitespace_unit(0xD83D));
    }
}
