// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.

use crate::types::Annotations;

/// Renderer for span styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` in the Markdown for each active annotation.
    ///
    /// Wrapping order, innermost first: code, underline, strikethrough,
    /// italic, bold, then the link. Underline uses `__x__`, which most
    /// Markdown readers show as bold.
    pub fn apply_styles(content: &str, annotations: &Annotations, href: Option<&str>) -> String {
        let mut result = content.to_string();

        if annotations.code {
            result = format!("`{}`", result);
        }

        if annotations.underline {
            result = format!("__{}__", result);
        }

        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }

        if annotations.italic {
            result = format!("*{}*", result);
        }

        if annotations.bold {
            result = format!("**{}**", result);
        }

        if let Some(url) = href {
            result = format!("[{}]({})", result, url);
        }

        result
    }
}
