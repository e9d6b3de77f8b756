// src/formatting/rich_text/mod.rs
//! Formats Notion rich-text spans into inline Markdown.

mod annotations;

use crate::types::RichTextItem;
use annotations::MarkdownStyleRenderer;

/// Renders spans into one inline Markdown fragment.
///
/// Spans are concatenated in order with no separator; empty input renders
/// as the empty string.
pub fn render_inline(spans: &[RichTextItem]) -> String {
    spans
        .iter()
        .map(|span| {
            MarkdownStyleRenderer::apply_styles(
                &span.plain_text,
                &span.annotations,
                span.href.as_deref(),
            )
        })
        .collect()
}

/// Concatenates the unstyled text of spans.
pub fn plain_text_of(spans: &[RichTextItem]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}
