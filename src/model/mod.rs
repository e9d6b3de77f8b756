mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::types::{DateValue, PageId};
use serde::{Deserialize, Serialize};

/// A page as seen in workspace search results: enough to pick an export root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,
    pub title: String,
    /// The page's `Date` property, when it has one set.
    pub date: Option<DateValue>,
}
