// src/lib.rs
//! notion2markdown library — exports Notion pages, with their full nested
//! block trees, as a single Markdown document.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `PartialFetch`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `ExportConfig`
//! - **Domain model** — `Block` and its variant structs, `PageSummary`
//! - **Domain types** — `PageId`, `BlockId`, `ApiKey`, `RichTextItem`, etc.
//! - **API** — `ContentSource`, `NotionHttpClient`, `fetch_all`, `BlockTreeBuilder`
//! - **Formatting** — `render_inline`, `render_node`, `render_blocks`
//! - **Pipeline** — `PageExporter`, page discovery, output delivery

mod analytics;
#[cfg(feature = "bench")]
pub mod api;
#[cfg(not(feature = "bench"))]
mod api;

mod config;
mod constants;
mod discovery;
mod error;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

#[cfg(feature = "bench")]
pub mod model;
#[cfg(not(feature = "bench"))]
mod model;

mod output;
mod pipeline;

#[cfg(feature = "bench")]
pub mod types;
#[cfg(not(feature = "bench"))]
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, PartialFetch};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{load_api_key, CommandLineInput, ExportConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, PageSummary};

// --- Block Types ---
pub use crate::model::blocks::{
    BookmarkBlock, BulletedListItemBlock, CalloutBlock, ChildDatabaseBlock, ChildPageBlock,
    CodeBlock, ColumnBlock, ColumnListBlock, DividerBlock, ExternalFile, FileObject,
    Heading1Block, Heading2Block, Heading3Block, Icon, ImageBlock, MalformedBlock, NotionFile,
    NumberedListItemBlock, ParagraphBlock, QuoteBlock, SyncedBlock, SyncedFrom, TableBlock,
    TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, DateValue, PageId, RenderedMarkdown, RichTextItem,
    ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    fetch_all,
    parser::{parse_block, parse_block_children, parse_block_list, parse_search_results},
    BlockTreeBuilder, BuildOptions, BuiltTree, ContentSource, NotionHttpClient,
    PaginatedResponse, TreeWarning,
};

// --- Formatting ---
pub use crate::formatting::{
    plain_text_of, render_block, render_blocks, render_inline, render_node, NodeMarkup,
    RenderOptions, RenderWarning, RenderedDocument,
};

// --- Discovery ---
pub use crate::discovery::{extract_title, log_pages, page_summary, resolve_log_page, search_pages};

// --- Analytics ---
pub use crate::analytics::{measure_tree, TreeStats};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline ---
pub use crate::pipeline::{ExportOptions, ExportedPage, PageExporter, PageTarget};
