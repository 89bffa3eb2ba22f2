// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

/// Marker appended to a cut snippet.
pub const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_length` characters on a word boundary.
///
/// Text that already fits is returned unchanged. Otherwise words are kept
/// while they fit in `max_length` minus the width of [`ELLIPSIS`], which is
/// then appended. Words are split on single spaces.
pub fn snippet(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let budget = max_length.saturating_sub(ELLIPSIS.len());
    let mut kept = 0;

    for (index, word) in text.split(' ').enumerate() {
        let cost = word.chars().count() + usize::from(index > 0);
        if kept + cost > budget {
            break;
        }
        kept += cost;
    }

    let end = text
        .char_indices()
        .nth(kept)
        .map_or(text.len(), |(offset, _)| offset);
    if end < text.len() {
        format!("{}{}", &text[..end], ELLIPSIS)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_cuts_on_word_boundary() {
        // width 20 minus an 8 column prefix leaves 12, i.e. 9 for words
        assert_eq!(snippet("The quick brown fox jumps", 20 - 8), "The quick...");
        assert_eq!(snippet("Transmission Control", 12), "...");
    }

    #[test]
    fn test_snippet_exact_fit_has_no_marker() {
        assert_eq!(snippet("The quick", 12), "The quick");
        assert_eq!(snippet("The quick ab", 20 - 8), "The quick ab");
        assert_eq!(snippet("The quick abc", 12), "The quick...");
        assert_eq!(snippet("", 12), "");
    }

    #[test]
    fn test_snippet_counts_characters() {
        assert_eq!(snippet("héllo wörld again", 14), "héllo wörld...");
    }

    #[test]
    fn test_snippet_tiny_width() {
        assert_eq!(snippet("abc", 2), "...");
        assert_eq!(snippet("ab", 2), "ab");
    }
}
