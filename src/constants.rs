// src/constants.rs
//! Domain constants that define the operational boundaries of the exporter.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role: how much a single request fetches, how deep the tree
//! may grow, and what a reader sees when content is missing.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking a page's block tree.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Maximum nesting depth when building a page's block tree.
///
/// Blocks at this level are kept but not expanded, and the cut is reported.
pub const NOTION_MAX_FETCH_DEPTH: usize = 50;

/// Location of the mounted API secret when running as a service.
pub const DEFAULT_SECRET_PATH: &str = "/run/secrets/notion_api_key";

/// Environment variables consulted, in order, when no secret file is readable.
pub const API_KEY_ENV_VARS: [&str; 2] = ["NOTION_TOKEN", "NOTION_API_KEY"];

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth the document assembler descends into.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 100;

/// Number of spaces per indentation level in formatted output.
pub const INDENT_SPACES: usize = 2;

/// Callout icon used when the block has no emoji icon.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Fence language used when a code block names none.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

pub const DEFAULT_IMAGE_ALT: &str = "image";

pub const UNTITLED_CHILD_PAGE: &str = "Untitled Child Page";

pub const UNTITLED_CHILD_DATABASE: &str = "Untitled Child Database";

pub const UNSUPPORTED_BLOCK_PLACEHOLDER: &str = "[Unsupported Block Type]";

pub const TABLE_BLOCK_PLACEHOLDER: &str = "[Table Block - Requires further processing]";

// ---------------------------------------------------------------------------
// Page discovery
// ---------------------------------------------------------------------------

pub const UNTITLED_PAGE_NO_TEXT: &str = "Untitled Page (No Title Text)";

pub const UNTITLED_PAGE_NO_PROPERTIES: &str = "Untitled Page (Properties Missing)";

pub const UNTITLED_DATABASE: &str = "Untitled Database";

/// Name of the page property that dates a log page.
pub const LOG_DATE_PROPERTY: &str = "Date";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
