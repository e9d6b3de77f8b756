use super::Block;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub has_children: bool,
    pub archived: bool,
    /// Nesting depth, stamped by the tree builder. Never read from the API.
    pub indent_level: usize,
    /// `None` until fetched. Stays `None` when the fetch failed or was cut off.
    pub children: Option<Vec<Block>>,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
            archived: false,
            indent_level: 0,
            children: None,
        }
    }

    /// Marks the block as having children on the source side without
    /// attaching any, the shape a freshly listed block arrives in.
    pub fn with_pending_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = Some(children);
        self
    }

    pub fn at_level(mut self, indent_level: usize) -> Self {
        self.indent_level = indent_level;
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}
