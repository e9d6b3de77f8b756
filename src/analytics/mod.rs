// src/analytics/mod.rs
//! Content measurement and statistics for block trees.

use crate::model::Block;

/// Quick statistics for user-facing completion messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total_blocks: usize,
    /// Levels of nesting; a flat page has depth 1, an empty page 0.
    pub deepest_nesting: usize,
    /// Blocks that have children on the source side but none attached.
    pub unexpanded_blocks: usize,
}

/// Measures a built tree without recursion.
pub fn measure_tree(blocks: &[Block]) -> TreeStats {
    let mut stats = TreeStats::default();
    let mut stack: Vec<(&Block, usize)> = blocks.iter().map(|b| (b, 1)).collect();

    while let Some((block, depth)) = stack.pop() {
        stats.total_blocks += 1;
        stats.deepest_nesting = stats.deepest_nesting.max(depth);
        if block.has_children() && block.common().children.is_none() {
            stats.unexpanded_blocks += 1;
        }
        stack.extend(block.children().iter().map(|child| (child, depth + 1)));
    }

    stats
}
