// src/formatting/document.rs
//! Document assembly: walks a block tree and collects its Markdown.
//!
//! The walk is pre-order over an explicit stack: a block's opening
//! fragments, then its children, then its closing fragments.

use super::block_renderer::render_node;
use crate::constants::BLOCK_MAX_RENDER_DEPTH;
use crate::model::Block;
use crate::types::{BlockId, RenderedMarkdown};
use std::fmt;

/// Limits for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of nesting levels rendered below the top-level blocks.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: BLOCK_MAX_RENDER_DEPTH,
        }
    }
}

/// Something in the tree that was not rendered as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A known block type whose payload could not be read. Nothing was
    /// emitted for the block itself; its children were still rendered.
    MalformedPayload {
        block_id: BlockId,
        block_type: String,
        reason: String,
    },
    /// The block's children lie below the render depth cap and were skipped.
    DepthLimitReached { block_id: BlockId, depth: usize },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPayload {
                block_id,
                block_type,
                reason,
            } => write!(
                f,
                "{} block {} skipped: malformed payload ({})",
                block_type, block_id, reason
            ),
            Self::DepthLimitReached { block_id, depth } => write!(
                f,
                "children of block {} skipped: render depth limit {} reached",
                block_id, depth
            ),
        }
    }
}

/// The output of one render: fragments in document order plus warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub fragments: Vec<String>,
    pub warnings: Vec<RenderWarning>,
}

impl RenderedDocument {
    /// The fragments joined with no separator.
    pub fn markdown(&self) -> RenderedMarkdown {
        RenderedMarkdown::new(self.fragments.concat())
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

enum Step<'a> {
    Visit { block: &'a Block, depth: usize },
    Emit(Vec<String>),
}

/// Renders top-level `blocks` and everything fetched beneath them.
pub fn render_blocks(blocks: &[Block], options: &RenderOptions) -> RenderedDocument {
    let mut document = RenderedDocument::default();
    let mut stack: Vec<Step> = blocks
        .iter()
        .rev()
        .map(|block| Step::Visit { block, depth: 0 })
        .collect();

    log::debug!("Rendering {} top-level block(s)", blocks.len());

    while let Some(step) = stack.pop() {
        let (block, depth) = match step {
            Step::Emit(closing) => {
                document.fragments.extend(closing);
                continue;
            }
            Step::Visit { block, depth } => (block, depth),
        };

        let markup = render_node(block);
        if let Some(warning) = markup.warning {
            log::warn!("{}", warning);
            document.warnings.push(warning);
        }
        document
            .fragments
            .extend(markup.opening.into_iter().filter(|f| !f.is_empty()));
        if !markup.closing.is_empty() {
            stack.push(Step::Emit(markup.closing));
        }

        let children = block.children();
        if children.is_empty() {
            continue;
        }
        if depth + 1 > options.max_depth {
            let warning = RenderWarning::DepthLimitReached {
                block_id: block.id().clone(),
                depth: depth + 1,
            };
            log::warn!("{}", warning);
            document.warnings.push(warning);
            continue;
        }
        stack.extend(children.iter().rev().map(|child| Step::Visit {
            block: child,
            depth: depth + 1,
        }));
    }

    document
}
