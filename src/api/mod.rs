// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! I/O (the HTTP client), decoding (the parser) and traversal (pagination,
//! tree building) are kept apart. Everything above this module depends on
//! the [`ContentSource`] trait, never on HTTP details.

pub mod client;
mod pagination;
pub mod parser;
mod responses;
mod tree_builder;

pub use client::NotionHttpClient;
pub use pagination::fetch_all;
pub use responses::PaginatedResponse;
pub use tree_builder::{BlockTreeBuilder, BuildOptions, BuiltTree, TreeWarning};

use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;

/// The ability to list content from a Notion workspace, one page of results
/// at a time.
///
/// This is the fundamental algebra for API interaction. Implementations
/// return the server's pages verbatim; following cursors is the caller's job.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Lists one page of a block's direct children, in document order.
    async fn list_block_children(
        &self,
        block: &BlockId,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Block>, AppError>;

    /// Lists one page of workspace search results restricted to pages.
    async fn search_pages(
        &self,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<serde_json::Value>, AppError>;
}
