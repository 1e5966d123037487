//! Character-based text helpers
//!
//! Lengths in this crate are counted in Unicode scalar values, never bytes,
//! so truncation can not split a multi-byte character.

/// Number of characters in `text`
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` down to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shorter_text_is_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn exact_length_is_untouched() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn longer_text_is_cut() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn multibyte_characters_are_counted_once() {
        assert_eq!(truncate_chars("äöüß", 2), "äö");
        assert_eq!(char_count("äöüß"), 4);
    }

    #[test]
    fn zero_limit_yields_empty() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    proptest! {
        #[test]
        fn truncated_text_never_exceeds_limit(text in ".{0,300}", limit in 0usize..200) {
            let cut = truncate_chars(&text, limit);
            prop_assert!(char_count(cut) <= limit);
            prop_assert!(text.starts_with(cut));
        }
    }
}
