//! Estimated reading time

use crate::content::{richtext, ContentBlock};

/// Estimate reading time in whole minutes, rounded up
///
/// Counts the words of all body text across all content blocks and divides
/// by the reading rate. Zero words is zero minutes, not an error.
pub fn estimate(content: &[ContentBlock], words_per_minute: u64) -> u64 {
    if words_per_minute == 0 {
        return 0;
    }

    richtext::word_count(content).div_ceil(words_per_minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RichTextSpan;
    use serde_json::Value;

    fn content_with_words(count: usize) -> Vec<ContentBlock> {
        let text = vec!["word"; count].join(" ");
        vec![ContentBlock {
            heading: "Heading".to_string(),
            body: vec![RichTextSpan {
                text,
                spans: Value::Array(Vec::new()),
                kind: "paragraph".to_string(),
            }],
        }]
    }

    #[test]
    fn test_exact_rate_is_one_minute() {
        assert_eq!(estimate(&content_with_words(200), 200), 1);
    }

    #[test]
    fn test_one_word_over_rounds_up() {
        assert_eq!(estimate(&content_with_words(201), 200), 2);
    }

    #[test]
    fn test_zero_words_is_zero_minutes() {
        assert_eq!(estimate(&content_with_words(0), 200), 0);
        assert_eq!(estimate(&[], 200), 0);
    }

    #[test]
    fn test_single_word() {
        assert_eq!(estimate(&content_with_words(1), 200), 1);
    }

    #[test]
    fn test_words_span_multiple_blocks() {
        let mut content = content_with_words(150);
        content.extend(content_with_words(51));
        assert_eq!(estimate(&content, 200), 2);
    }
}
