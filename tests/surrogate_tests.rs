#[cfg(test)]
mod tests {
    use sophie_bot::surrogate::{decode, encode, utf16_len};

    #[test]
    fn test_round_trip() {
        let samples = [
            "",
            "plain ascii",
            "Привет, мир",
            "日本語のテキスト",
            "emoji 😀🌍👍🏽 mixed",
            "family 👨‍👩‍👧 zwj",
            "math 𝔘𝔫𝔦𝔠𝔬𝔡𝔢",
            "\u{FFFF}\u{10000}\u{10FFFF}",
        ];
        for sample in samples {
            assert_eq!(decode(&encode(sample)), sample);
        }
    }

    #[test]
    fn test_lengths_match_telegram_addressing() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("😀"), 2);
        assert_eq!(utf16_len("👍🏽"), 4);
        assert_eq!(encode("a😀b").len(), 4);
    }

    #[test]
    fn test_astral_encoding() {
        assert_eq!(encode("\u{10000}"), vec![0xD800, 0xDC00]);
        assert_eq!(encode("\u{10FFFF}"), vec![0xDBFF, 0xDFFF]);
        assert_eq!(encode("\u{FFFF}"), vec![0xFFFF]);
    }

    #[test]
    fn test_invalid_units_decode_without_error() {
        assert_eq!(decode(&[0xDC00]), "\u{FFFD}");
        assert_eq!(decode(&[0x68, 0xD800, 0x69]), "h\u{FFFD}i");
    }
}
