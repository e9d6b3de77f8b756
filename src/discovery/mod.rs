// src/discovery/mod.rs
//! Finds pages to export by searching the workspace.
//!
//! A "log page" is a page whose title contains the whole word `log` and
//! whose `Date` property is set. Log pages are addressed by their position
//! in search order.

use crate::api::{fetch_all, ContentSource};
use crate::constants::*;
use crate::error::AppError;
use crate::model::PageSummary;
use crate::types::{DateValue, PageId};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

static LOG_TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blog\b").expect("log title regex is a valid pattern"));

/// A title span as it appears in page properties and database titles.
#[derive(Debug, Deserialize)]
struct TitleSpan {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    plain_text: String,
}

/// Date property value on the wire; `start`/`end` may carry a time.
#[derive(Debug, Deserialize)]
struct WireDate {
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    time_zone: Option<String>,
}

/// Lists every page visible to the integration, in search order.
///
/// A search that fails part way keeps the pages that arrived. Only a
/// failure on the first request is an error.
pub async fn search_pages(source: &dyn ContentSource) -> Result<Vec<PageSummary>, AppError> {
    let objects = match fetch_all(
        |page_size, cursor| source.search_pages(cursor, page_size),
        None,
    )
    .await
    {
        Ok(objects) => objects,
        Err(partial) if partial.is_total() => return Err(partial.cause),
        Err(partial) => {
            log::warn!("Search truncated: {}", partial);
            partial.into_items()
        }
    };

    log::debug!("Search returned {} object(s)", objects.len());

    Ok(objects
        .iter()
        .filter_map(|object| match page_summary(object) {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::warn!("Skipping unreadable search result: {}", e);
                None
            }
        })
        .collect())
}

/// Keeps the log pages, preserving order.
pub fn log_pages(pages: Vec<PageSummary>) -> Vec<PageSummary> {
    pages
        .into_iter()
        .filter(|page| LOG_TITLE_REGEX.is_match(&page.title) && page.date.is_some())
        .collect()
}

/// Resolves the log page at `index` in search order.
pub async fn resolve_log_page(
    source: &dyn ContentSource,
    index: usize,
) -> Result<PageId, AppError> {
    let logs = log_pages(search_pages(source).await?);
    log::info!("Found {} log page(s)", logs.len());

    if logs.is_empty() {
        return Err(AppError::PageNotResolved(
            "no log pages found in the workspace".to_string(),
        ));
    }

    let count = logs.len();
    logs.into_iter()
        .nth(index)
        .map(|page| {
            log::info!("Selected log page '{}' ({})", page.title, page.id);
            page.id
        })
        .ok_or_else(|| {
            AppError::PageNotResolved(format!(
                "log page index {} out of range ({} log page(s) found)",
                index, count
            ))
        })
}

/// Decodes one search result.
pub fn page_summary(object: &Value) -> Result<PageSummary, AppError> {
    let id = object
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("search result without id".to_string()))?;

    Ok(PageSummary {
        id: PageId::parse(id)?,
        title: extract_title(object),
        date: date_property(object, LOG_DATE_PROPERTY),
    })
}

/// Title of a page or database object, with readable defaults.
pub fn extract_title(object: &Value) -> String {
    match object.get("object").and_then(Value::as_str) {
        Some("database") => {
            let spans = title_spans(object.get("title"));
            if spans.is_empty() {
                UNTITLED_DATABASE.to_string()
            } else {
                join_text_spans(&spans)
            }
        }
        _ => page_title(object),
    }
}

fn page_title(page: &Value) -> String {
    let title_property = page
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|properties| {
            properties
                .values()
                .find(|property| property.get("type").and_then(Value::as_str) == Some("title"))
        });

    match title_property {
        Some(property) => {
            let spans = title_spans(property.get("title"));
            if spans.is_empty() {
                UNTITLED_PAGE_NO_TEXT.to_string()
            } else {
                join_text_spans(&spans)
            }
        }
        None => UNTITLED_PAGE_NO_PROPERTIES.to_string(),
    }
}

fn title_spans(value: Option<&Value>) -> Vec<TitleSpan> {
    value
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Mentions and equations in titles are skipped.
fn join_text_spans(spans: &[TitleSpan]) -> String {
    spans
        .iter()
        .filter(|span| span.kind == "text")
        .map(|span| span.plain_text.as_str())
        .collect()
}

fn date_property(page: &Value, name: &str) -> Option<DateValue> {
    let raw = page.get("properties")?.get(name)?.get("date")?;
    if raw.is_null() {
        return None;
    }
    let wire: WireDate = match serde_json::from_value(raw.clone()) {
        Ok(wire) => wire,
        Err(e) => {
            log::warn!("Unreadable {} property: {}", name, e);
            return None;
        }
    };
    Some(DateValue {
        start: parse_notion_date(&wire.start)?,
        end: wire.end.as_deref().and_then(parse_notion_date),
        time_zone: wire.time_zone,
    })
}

/// Accepts both date-only and RFC 3339 date-time values.
fn parse_notion_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
