// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! Only the fields the exporter reads are modeled. Unknown fields are
//! ignored so new API additions never break decoding.

use crate::model::{FileObject, SyncedFrom};
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page that continues at `cursor`.
    pub fn continued(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Fields every block object carries, whatever its type.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockEnvelope {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
}

// --- Type-specific payloads (the object under the key named by `type`) ---

#[derive(Debug, Deserialize)]
pub struct TextPayload {
    pub rich_text: Vec<RichTextItem>,
}

#[derive(Debug, Deserialize)]
pub struct ToDoPayload {
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalloutPayload {
    pub rich_text: Vec<RichTextItem>,
    /// Kept raw: icon kinds outside the known set must not spoil the block.
    #[serde(default)]
    pub icon: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct CodePayload {
    pub rich_text: Vec<RichTextItem>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    #[serde(flatten)]
    pub image: FileObject,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkPayload {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Deserialize)]
pub struct TitledPayload {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TablePayload {
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

#[derive(Debug, Deserialize)]
pub struct SyncedPayload {
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

/// Body of `POST /v1/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub filter: SearchFilter,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchFilter {
    pub property: &'static str,
    pub value: &'static str,
}

impl SearchRequest {
    /// Search restricted to page objects.
    pub fn pages(page_size: u32, start_cursor: Option<String>) -> Self {
        Self {
            filter: SearchFilter {
                property: "object",
                value: "page",
            },
            page_size,
            start_cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_request_omits_absent_cursor() {
        let body = serde_json::to_value(SearchRequest::pages(100, None)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "filter": { "property": "object", "value": "page" },
                "page_size": 100
            })
        );

        let body = serde_json::to_value(SearchRequest::pages(50, Some("c1".into()))).unwrap();
        assert_eq!(body["start_cursor"], "c1");
    }

    #[test]
    fn list_response_tolerates_missing_cursor_fields() {
        let page: PaginatedResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({ "object": "list", "results": [] }))
                .unwrap();
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }
}
