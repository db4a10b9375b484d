//! Plain-text extraction for rich-text fields.

use scraper::Html;

/// Returns the text content of an HTML fragment.
///
/// Text nodes are concatenated in document order and surrounding whitespace
/// is trimmed. Plain strings pass through unchanged.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}
