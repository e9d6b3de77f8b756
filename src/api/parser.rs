// src/api/parser.rs
//! Decoding of Notion API responses into the domain model.
//!
//! Response status decides between the success body and the Notion error
//! envelope. Block lists are decoded one block at a time: a block whose
//! type-specific payload cannot be read becomes `Block::Malformed`, and a
//! type outside the known set becomes `Block::Unsupported`. Neither fails
//! the list.

use super::client::ApiResponse;
use super::responses::*;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::blocks::*;
use crate::model::{Block, BlockCommon};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse any Notion API response by status.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Decode the Notion error envelope, falling back to the bare HTTP status.
fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return AppError::NotionApi {
            status: notion_error.status,
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            request_id: notion_error.request_id,
        };
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse one page of `GET /v1/blocks/{id}/children`.
pub fn parse_block_children(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: PaginatedResponse<Value> = parse_api_response(result)?;
    Ok(PaginatedResponse {
        object: response.object,
        results: parse_block_list(response.results),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Parse one page of `POST /v1/search`. Results stay raw for discovery to read.
pub fn parse_search_results(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Value>, AppError> {
    parse_api_response(result)
}

/// Decode a list of raw block objects, dropping only those without a
/// readable identity.
pub fn parse_block_list(values: Vec<Value>) -> Vec<Block> {
    values
        .into_iter()
        .filter_map(|value| match parse_block(value) {
            Ok(block) => Some(block),
            Err(e) => {
                log::warn!("Skipping block with unreadable envelope: {}", e);
                None
            }
        })
        .collect()
}

/// Decode one raw block object.
///
/// Fails only when the envelope (`id`, `type`) is unreadable. Payload
/// problems are reported through `Block::Malformed`.
pub fn parse_block(value: Value) -> Result<Block, AppError> {
    let envelope: BlockEnvelope = serde_json::from_value(value.clone())?;
    let common = BlockCommon {
        has_children: envelope.has_children,
        archived: envelope.archived,
        ..BlockCommon::new(envelope.id)
    };
    let block_type = envelope.block_type;
    let payload = value.get(&block_type).cloned();

    match convert_payload(&block_type, common.clone(), payload) {
        Ok(block) => Ok(block),
        Err(reason) => {
            log::debug!("Malformed {} block {}: {}", block_type, common.id, reason);
            Ok(Block::Malformed(MalformedBlock {
                common,
                block_type,
                reason,
            }))
        }
    }
}

/// Reads the payload object under the block's type key.
fn payload_of<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, String> {
    let payload = payload.ok_or_else(|| "missing type-specific payload".to_string())?;
    serde_json::from_value(payload).map_err(|e| e.to_string())
}

fn text_of(payload: Option<Value>) -> Result<TextBlockContent, String> {
    let TextPayload { rich_text } = payload_of(payload)?;
    Ok(TextBlockContent::new(rich_text))
}

fn convert_payload(
    block_type: &str,
    common: BlockCommon,
    payload: Option<Value>,
) -> Result<Block, String> {
    let block = match block_type {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: text_of(payload)?,
        }),
        "heading_1" => Block::Heading1(Heading1Block {
            common,
            content: text_of(payload)?,
        }),
        "heading_2" => Block::Heading2(Heading2Block {
            common,
            content: text_of(payload)?,
        }),
        "heading_3" => Block::Heading3(Heading3Block {
            common,
            content: text_of(payload)?,
        }),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: text_of(payload)?,
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: text_of(payload)?,
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: text_of(payload)?,
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: text_of(payload)?,
        }),
        "to_do" => {
            let ToDoPayload { rich_text, checked } = payload_of(payload)?;
            Block::ToDo(ToDoBlock {
                common,
                content: TextBlockContent::new(rich_text),
                checked,
            })
        }
        "callout" => {
            let CalloutPayload { rich_text, icon } = payload_of(payload)?;
            Block::Callout(CalloutBlock {
                common,
                icon: icon.and_then(|icon| serde_json::from_value::<Icon>(icon).ok()),
                content: TextBlockContent::new(rich_text),
            })
        }
        "code" => {
            let CodePayload {
                rich_text,
                language,
            } = payload_of(payload)?;
            Block::Code(CodeBlock {
                common,
                language,
                content: TextBlockContent::new(rich_text),
            })
        }
        "divider" => Block::Divider(DividerBlock { common }),
        "image" => {
            let ImagePayload { image, caption } = payload_of(payload)?;
            Block::Image(ImageBlock {
                common,
                image,
                caption,
            })
        }
        "bookmark" => {
            let BookmarkPayload { url, caption } = payload_of(payload)?;
            Block::Bookmark(BookmarkBlock {
                common,
                url,
                caption,
            })
        }
        "child_page" => {
            let TitledPayload { title } = payload_of(payload)?;
            Block::ChildPage(ChildPageBlock { common, title })
        }
        "child_database" => {
            let TitledPayload { title } = payload_of(payload)?;
            Block::ChildDatabase(ChildDatabaseBlock { common, title })
        }
        "table" => {
            let TablePayload {
                table_width,
                has_column_header,
                has_row_header,
            } = payload_of(payload)?;
            Block::Table(TableBlock {
                common,
                table_width,
                has_column_header,
                has_row_header,
            })
        }
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        "synced_block" => {
            let SyncedPayload { synced_from } = payload_of(payload)?;
            Block::Synced(SyncedBlock {
                common,
                synced_from,
            })
        }
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    };
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "59833787-2cf9-4fdf-8782-e53db20768a5";

    fn response(status: StatusCode, body: Value) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://api.notion.com/v1/blocks/x/children".to_string(),
        }
    }

    #[test]
    fn error_envelope_becomes_notion_api_error() {
        let body = json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find block with ID: abc123",
            "request_id": "req_123"
        });

        let err = parse_block_children(response(StatusCode::NOT_FOUND, body)).unwrap_err();
        match err {
            AppError::NotionApi { code, status, .. } => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(status, 404);
            }
            other => panic!("expected NotionApi, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status() {
        let result = ApiResponse {
            data: "<html>Bad gateway</html>".to_string(),
            status: StatusCode::BAD_GATEWAY,
            url: "https://api.notion.com/v1/search".to_string(),
        };
        match parse_search_results(result).unwrap_err() {
            AppError::NotionService { code, .. } => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502))
            }
            other => panic!("expected NotionService, got {other:?}"),
        }
    }

    #[test]
    fn decodes_paragraph_with_styled_text() {
        let block = parse_block(json!({
            "object": "block",
            "id": ID,
            "type": "paragraph",
            "has_children": true,
            "archived": false,
            "paragraph": {
                "rich_text": [
                    { "plain_text": "Hello ", "annotations": {} },
                    { "plain_text": "world", "annotations": { "bold": true } }
                ],
                "color": "default"
            }
        }))
        .unwrap();

        let Block::Paragraph(paragraph) = &block else {
            panic!("expected paragraph, got {block:?}");
        };
        assert!(block.has_children());
        assert_eq!(block.id().as_str(), "598337872cf94fdf8782e53db20768a5");
        assert_eq!(paragraph.content.rich_text.len(), 2);
        assert!(paragraph.content.rich_text[1].annotations.bold);
    }

    #[test]
    fn unknown_type_is_unsupported_not_an_error() {
        let block = parse_block(json!({
            "id": ID,
            "type": "equation",
            "equation": { "expression": "e=mc^2" }
        }))
        .unwrap();
        assert!(matches!(block, Block::Unsupported(ref b) if b.block_type == "equation"));
    }

    #[test]
    fn unreadable_payload_is_isolated_as_malformed() {
        let blocks = parse_block_list(vec![
            json!({ "id": ID, "type": "heading_1", "heading_1": { "color": "default" } }),
            json!({ "id": ID, "type": "divider", "divider": {} }),
        ]);
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Malformed(b) if b.block_type == "heading_1"));
        assert!(matches!(&blocks[1], Block::Divider(_)));
    }

    #[test]
    fn blocks_without_identity_are_dropped() {
        let blocks = parse_block_list(vec![
            json!({ "type": "divider", "divider": {} }),
            json!({ "id": ID, "type": "divider", "divider": {} }),
        ]);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn image_reads_hosted_and_external_sources() {
        let hosted = parse_block(json!({
            "id": ID,
            "type": "image",
            "image": {
                "type": "file",
                "caption": [{ "plain_text": "Diagram" }],
                "file": { "url": "https://s3.example.com/d.png",
                          "expiry_time": "2024-01-01T00:00:00.000Z" }
            }
        }))
        .unwrap();
        let Block::Image(image) = hosted else {
            panic!("expected image");
        };
        assert_eq!(image.image.url(), Some("https://s3.example.com/d.png"));
        assert_eq!(image.caption[0].plain_text, "Diagram");

        let external = parse_block(json!({
            "id": ID,
            "type": "image",
            "image": { "type": "external", "external": { "url": "https://cdn.example.com/e.png" } }
        }))
        .unwrap();
        let Block::Image(image) = external else {
            panic!("expected image");
        };
        assert_eq!(image.image.url(), Some("https://cdn.example.com/e.png"));
    }

    #[test]
    fn callout_with_unknown_icon_kind_keeps_text() {
        let block = parse_block(json!({
            "id": ID,
            "type": "callout",
            "callout": {
                "rich_text": [{ "plain_text": "Heads up" }],
                "icon": { "type": "custom_emoji", "custom_emoji": { "id": "x" } }
            }
        }))
        .unwrap();
        let Block::Callout(callout) = block else {
            panic!("expected callout");
        };
        assert!(callout.icon.is_none());
        assert_eq!(callout.content.rich_text[0].plain_text, "Heads up");
    }

    #[test]
    fn synced_reference_keeps_origin_id() {
        let block = parse_block(json!({
            "id": ID,
            "type": "synced_block",
            "has_children": true,
            "synced_block": {
                "synced_from": { "type": "block_id", "block_id": "a0c7e3a4-8d73-4a4f-9a3b-1a2b3c4d5e6f" }
            }
        }))
        .unwrap();
        assert!(!block.wants_children());
    }
}
