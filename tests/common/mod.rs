// tests/common/mod.rs
//! Shared fixtures: an in-memory workspace served through `ContentSource`.
#![allow(dead_code)]

use async_trait::async_trait;
use notion2markdown::{
    parse_block_list, AppError, Block, BlockId, ContentSource, PageId, PaginatedResponse,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A workspace held as raw API JSON, listed page by page like the real API.
#[derive(Default)]
pub struct FixtureWorkspace {
    children: HashMap<BlockId, Vec<Value>>,
    failing: HashSet<BlockId>,
    failing_cursor: HashMap<BlockId, String>,
    pages: Vec<Value>,
    /// Page size used instead of the requested one, when set.
    chunk: Option<usize>,
    listings: AtomicUsize,
}

impl FixtureWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, parent: &BlockId, blocks: Vec<Value>) -> Self {
        self.children.insert(parent.clone(), blocks);
        self
    }

    pub fn with_page(self, page: &PageId, blocks: Vec<Value>) -> Self {
        self.with_children(&BlockId::from(page), blocks)
    }

    pub fn failing(mut self, parent: &BlockId) -> Self {
        self.failing.insert(parent.clone());
        self
    }

    pub fn failing_at_cursor(mut self, parent: &BlockId, cursor: &str) -> Self {
        self.failing_cursor.insert(parent.clone(), cursor.to_string());
        self
    }

    pub fn with_search_results(mut self, pages: Vec<Value>) -> Self {
        self.pages = pages;
        self
    }

    pub fn in_chunks_of(mut self, chunk: usize) -> Self {
        self.chunk = Some(chunk);
        self
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    fn slice<T: Clone>(
        &self,
        all: &[T],
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<(Vec<T>, Option<String>), AppError> {
        let start = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|e| AppError::MalformedResponse(e.to_string()))?,
            None => 0,
        };
        let size = self.chunk.unwrap_or(page_size as usize).max(1);
        let end = (start + size).min(all.len());
        let next = (end < all.len()).then(|| end.to_string());
        Ok((all[start.min(end)..end].to_vec(), next))
    }
}

#[async_trait]
impl ContentSource for FixtureWorkspace {
    async fn list_block_children(
        &self,
        block: &BlockId,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.listings.fetch_add(1, Ordering::SeqCst);

        let fails_here = self
            .failing_cursor
            .get(block)
            .is_some_and(|c| cursor.as_deref() == Some(c.as_str()));
        if self.failing.contains(block) || fails_here {
            return Err(AppError::MalformedResponse(format!(
                "listing children of {} failed",
                block
            )));
        }

        let all = self.children.get(block).cloned().unwrap_or_default();
        let (page, next) = self.slice(&all, cursor, page_size)?;
        let blocks = parse_block_list(page);
        Ok(match next {
            Some(cursor) => PaginatedResponse::continued(blocks, cursor),
            None => PaginatedResponse::last(blocks),
        })
    }

    async fn search_pages(
        &self,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let (page, next) = self.slice(&self.pages, cursor, page_size)?;
        Ok(match next {
            Some(cursor) => PaginatedResponse::continued(page, cursor),
            None => PaginatedResponse::last(page),
        })
    }
}

pub fn block_id(n: u32) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn page_id(n: u32) -> PageId {
    PageId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn text(content: &str) -> Value {
    json!({
        "type": "text",
        "text": { "content": content, "link": null },
        "plain_text": content,
        "href": null
    })
}

pub fn bold(content: &str) -> Value {
    let mut span = text(content);
    span["annotations"] = json!({ "bold": true, "color": "default" });
    span
}

/// A block object as the API lists it.
pub fn block(n: u32, block_type: &str, has_children: bool, payload: Value) -> Value {
    let mut object = json!({
        "object": "block",
        "id": block_id(n).to_dashed(),
        "type": block_type,
        "has_children": has_children,
        "archived": false
    });
    object[block_type] = payload;
    object
}

pub fn rich(block_type: &str, n: u32, spans: Vec<Value>, has_children: bool) -> Value {
    block(n, block_type, has_children, json!({ "rich_text": spans, "color": "default" }))
}

pub fn paragraph(n: u32, content: &str) -> Value {
    rich("paragraph", n, vec![text(content)], false)
}

pub fn parent_paragraph(n: u32, content: &str) -> Value {
    rich("paragraph", n, vec![text(content)], true)
}

/// A page as the search endpoint returns it.
pub fn search_page(n: u32, title: &str, date: Option<&str>) -> Value {
    json!({
        "object": "page",
        "id": page_id(n).to_dashed(),
        "properties": {
            "Name": { "id": "title", "type": "title", "title": [text(title)] },
            "Date": { "id": "d", "type": "date", "date": date.map(|d| json!({ "start": d })) }
        }
    })
}
