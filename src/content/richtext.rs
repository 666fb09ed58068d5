//! Plain-text extraction from the CMS rich-text format

use super::post::{ContentBlock, RichTextSpan};

/// Concatenate the plain text of a rich-text body, markup stripped
///
/// Blocks are joined with a single space so word boundaries survive.
pub fn as_text(body: &[RichTextSpan]) -> String {
    body.iter()
        .map(|span| span.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count the words across all content blocks of a post body
pub fn word_count(content: &[ContentBlock]) -> u64 {
    content
        .iter()
        .map(|block| as_text(&block.body).split_whitespace().count() as u64)
        .sum()
}
