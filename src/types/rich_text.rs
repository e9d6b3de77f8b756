use serde::{Deserialize, Serialize};

/// One run of styled inline text.
///
/// `plain_text` is what gets rendered; `href` is the span's link target,
/// present for both text links and mentions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create an unstyled span.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            ..Default::default()
        }
    }

    /// Returns this span with the given annotations.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns this span linked to `href`.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Independent style flags on a span. Color is not carried: Markdown has no
/// equivalent and the exporter never renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Date value with optional end date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: chrono::NaiveDate,
    pub end: Option<chrono::NaiveDate>,
    pub time_zone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_span_ignoring_unknown_fields() {
        let json = serde_json::json!({
            "type": "text",
            "text": { "content": "world", "link": null },
            "annotations": { "bold": true, "italic": false, "strikethrough": false,
                             "underline": false, "code": false, "color": "default" },
            "plain_text": "world",
            "href": null
        });

        let item: RichTextItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.plain_text, "world");
        assert!(item.annotations.bold);
        assert!(item.href.is_none());
    }

    #[test]
    fn missing_annotations_default_to_plain() {
        let item: RichTextItem =
            serde_json::from_value(serde_json::json!({ "plain_text": "x" })).unwrap();
        assert!(item.annotations.is_plain());
    }
}
