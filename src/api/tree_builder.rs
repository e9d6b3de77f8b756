// src/api/tree_builder.rs
//! Materializes a page's full block tree.
//!
//! The builder walks the tree with an explicit worklist instead of
//! recursion. Every fetched block is appended to a flat arena together with
//! the index of its parent; expansion proceeds wave by wave (one wave per
//! nesting level). Once nothing is left to expand, a reverse sweep over the
//! arena moves each block into its parent. Children always sit at higher
//! indices than their parent, so the sweep sees every subtree complete
//! before the parent is moved.

use super::pagination::fetch_all;
use super::ContentSource;
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::{AppError, PartialFetch};
use crate::model::Block;
use crate::types::BlockId;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Limits for one tree build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Blocks at this nesting level are kept but not expanded.
    pub max_depth: usize,
    /// How many child listings may be in flight at once. 1 is sequential.
    pub concurrency: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: NOTION_MAX_FETCH_DEPTH,
            concurrency: 1,
        }
    }
}

/// Something the builder could not fully materialize. The tree is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeWarning {
    /// The block sits at the depth cap; its children were not fetched.
    DepthLimitReached { block_id: BlockId, depth: usize },
    /// The block was already expanded elsewhere in this tree.
    RepeatedBlock { block_id: BlockId },
    /// Listing the block's children failed before any page arrived.
    ChildrenUnavailable { block_id: BlockId, cause: String },
    /// Listing failed part way; the children that arrived were kept.
    ChildrenTruncated {
        block_id: BlockId,
        kept: usize,
        cause: String,
    },
}

impl fmt::Display for TreeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthLimitReached { block_id, depth } => {
                write!(f, "block {} not expanded: depth limit {} reached", block_id, depth)
            }
            Self::RepeatedBlock { block_id } => {
                write!(f, "block {} appears more than once; expanded only once", block_id)
            }
            Self::ChildrenUnavailable { block_id, cause } => {
                write!(f, "children of block {} unavailable: {}", block_id, cause)
            }
            Self::ChildrenTruncated {
                block_id,
                kept,
                cause,
            } => write!(
                f,
                "children of block {} truncated after {} item(s): {}",
                block_id, kept, cause
            ),
        }
    }
}

/// The ordered tree of a page plus what went wrong while building it.
#[derive(Debug, Clone, Default)]
pub struct BuiltTree {
    /// Top-level blocks of the page, in document order.
    pub blocks: Vec<Block>,
    pub warnings: Vec<TreeWarning>,
    /// Page requests issued against the content source.
    pub requests: usize,
}

impl BuiltTree {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A block in the arena, detached from its children.
struct ArenaNode {
    block: Block,
    parent: Option<usize>,
    /// Whether a children listing (full or partial) was attached.
    expanded: bool,
}

/// Builds block trees from a [`ContentSource`].
pub struct BlockTreeBuilder {
    source: Arc<dyn ContentSource>,
    options: BuildOptions,
}

impl BlockTreeBuilder {
    pub fn new(source: Arc<dyn ContentSource>, options: BuildOptions) -> Self {
        Self { source, options }
    }

    /// Builds the tree under `root`.
    ///
    /// Fails only when not a single page of the root's children could be
    /// listed. Every failure below the root becomes a [`TreeWarning`].
    pub async fn build(&self, root: &BlockId) -> Result<BuiltTree, AppError> {
        let requests = AtomicUsize::new(0);
        let mut warnings = Vec::new();
        let mut arena: Vec<ArenaNode> = Vec::new();
        let mut expanded_ids: HashSet<BlockId> = HashSet::new();
        expanded_ids.insert(root.clone());

        log::info!("Building block tree for {}", root);

        let top_level = match self.fetch_children(root, &requests).await {
            Ok(blocks) => blocks,
            Err(partial) if partial.is_total() => {
                return Err(AppError::RootFetchFailed {
                    root_id: root.to_string(),
                    cause: Box::new(partial.cause),
                });
            }
            Err(partial) => {
                log::warn!("Listing of root {} truncated: {}", root, partial);
                warnings.push(TreeWarning::ChildrenTruncated {
                    block_id: root.clone(),
                    kept: partial.items.len(),
                    cause: partial.cause.to_string(),
                });
                partial.into_items()
            }
        };

        let mut wave = append_children(&mut arena, None, 0, top_level);

        while !wave.is_empty() {
            let mut to_fetch = Vec::with_capacity(wave.len());
            for index in wave {
                let block = &arena[index].block;
                let depth = block.indent_level();
                if depth >= self.options.max_depth {
                    log::debug!("Depth limit {} reached at block {}", depth, block.id());
                    warnings.push(TreeWarning::DepthLimitReached {
                        block_id: block.id().clone(),
                        depth,
                    });
                } else if !expanded_ids.insert(block.id().clone()) {
                    log::warn!("Block {} repeats within the tree", block.id());
                    warnings.push(TreeWarning::RepeatedBlock {
                        block_id: block.id().clone(),
                    });
                } else {
                    to_fetch.push((index, block.id().clone()));
                }
            }

            // `buffered` yields in submission order, so fan-out never
            // reorders siblings.
            let requests = &requests;
            let results: Vec<_> = stream::iter(to_fetch)
                .map(|(index, id)| async move {
                    let listed = self.fetch_children(&id, requests).await;
                    (index, id, listed)
                })
                .buffered(self.options.concurrency.max(1))
                .collect()
                .await;

            let mut next_wave = Vec::new();
            for (index, id, listed) in results {
                let children = match listed {
                    Ok(children) => children,
                    Err(partial) if partial.is_total() => {
                        log::warn!("Children of block {} unavailable: {}", id, partial.cause);
                        warnings.push(TreeWarning::ChildrenUnavailable {
                            block_id: id,
                            cause: partial.cause.to_string(),
                        });
                        continue;
                    }
                    Err(partial) => {
                        log::warn!("Children of block {} truncated: {}", id, partial);
                        warnings.push(TreeWarning::ChildrenTruncated {
                            block_id: id,
                            kept: partial.items.len(),
                            cause: partial.cause.to_string(),
                        });
                        partial.into_items()
                    }
                };

                arena[index].expanded = true;
                let depth = arena[index].block.indent_level() + 1;
                next_wave.extend(append_children(&mut arena, Some(index), depth, children));
            }
            wave = next_wave;
        }

        let requests = requests.into_inner();
        log::info!(
            "Built tree for {}: {} block(s), {} request(s), {} warning(s)",
            root,
            arena.len(),
            requests,
            warnings.len()
        );

        Ok(BuiltTree {
            blocks: assemble(arena),
            warnings,
            requests,
        })
    }

    async fn fetch_children(
        &self,
        block: &BlockId,
        requests: &AtomicUsize,
    ) -> Result<Vec<Block>, PartialFetch<Block>> {
        log::debug!("Listing children of {}", block);
        fetch_all(
            |page_size, cursor| {
                requests.fetch_add(1, Ordering::Relaxed);
                self.source.list_block_children(block, cursor, page_size)
            },
            None,
        )
        .await
    }
}

/// Appends `children` to the arena under `parent`, stamping their depth.
/// Returns the indices of the appended blocks that want expansion.
fn append_children(
    arena: &mut Vec<ArenaNode>,
    parent: Option<usize>,
    depth: usize,
    children: Vec<Block>,
) -> Vec<usize> {
    let mut expandable = Vec::new();
    for mut block in children {
        let common = block.common_mut();
        common.indent_level = depth;
        common.children = None;
        if block.wants_children() {
            expandable.push(arena.len());
        }
        arena.push(ArenaNode {
            block,
            parent,
            expanded: false,
        });
    }
    expandable
}

/// Moves every arena block into its parent, back to front.
fn assemble(arena: Vec<ArenaNode>) -> Vec<Block> {
    let mut pending: Vec<Vec<Block>> = arena.iter().map(|_| Vec::new()).collect();
    let mut roots = Vec::new();

    for (index, node) in arena.into_iter().enumerate().rev() {
        let ArenaNode {
            mut block,
            parent,
            expanded,
        } = node;
        if expanded {
            let mut children = std::mem::take(&mut pending[index]);
            children.reverse();
            block.set_children(children);
        }
        match parent {
            Some(parent) => pending[parent].push(block),
            None => roots.push(block),
        }
    }

    roots.reverse();
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginatedResponse;
    use crate::model::{BlockCommon, ParagraphBlock, TextBlockContent, ToggleBlock};
    use std::collections::HashMap;

    /// In-memory source serving children in pages of `chunk`.
    #[derive(Default)]
    struct TreeSource {
        children: HashMap<BlockId, Vec<Block>>,
        failing: HashSet<BlockId>,
        /// Fail requests for this block whose cursor equals the value.
        failing_cursor: HashMap<BlockId, String>,
        chunk: usize,
    }

    #[async_trait::async_trait]
    impl ContentSource for TreeSource {
        async fn list_block_children(
            &self,
            block: &BlockId,
            cursor: Option<String>,
            _page_size: u32,
        ) -> Result<PaginatedResponse<Block>, AppError> {
            if self.failing.contains(block)
                || self.failing_cursor.get(block).is_some_and(|c| Some(c) == cursor.as_ref())
            {
                return Err(AppError::MalformedResponse(format!("listing {} failed", block)));
            }
            let all = self.children.get(block).cloned().unwrap_or_default();
            let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
            let chunk = if self.chunk == 0 { all.len().max(1) } else { self.chunk };
            let end = (start + chunk).min(all.len());
            let page = all[start..end].to_vec();
            Ok(if end < all.len() {
                PaginatedResponse::continued(page, end.to_string())
            } else {
                PaginatedResponse::last(page)
            })
        }

        async fn search_pages(
            &self,
            _cursor: Option<String>,
            _page_size: u32,
        ) -> Result<PaginatedResponse<serde_json::Value>, AppError> {
            Ok(PaginatedResponse::last(Vec::new()))
        }
    }

    fn id(n: u32) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn paragraph(n: u32, has_children: bool) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon {
                has_children,
                ..BlockCommon::new(id(n))
            },
            content: TextBlockContent::plain(&format!("p{}", n)),
        })
    }

    fn toggle(n: u32) -> Block {
        Block::Toggle(ToggleBlock {
            common: BlockCommon::new(id(n)).with_pending_children(),
            content: TextBlockContent::plain(&format!("t{}", n)),
        })
    }

    fn text(block: &Block) -> String {
        match block {
            Block::Paragraph(b) => b.content.rich_text[0].plain_text.clone(),
            Block::Toggle(b) => b.content.rich_text[0].plain_text.clone(),
            other => other.block_type().to_string(),
        }
    }

    fn builder(source: TreeSource, options: BuildOptions) -> BlockTreeBuilder {
        BlockTreeBuilder::new(Arc::new(source), options)
    }

    /// root(0) -> [p1 -> [p3, t4 -> [p5]], p2]
    fn nested_source() -> TreeSource {
        let mut source = TreeSource::default();
        source
            .children
            .insert(id(0), vec![paragraph(1, true), paragraph(2, false)]);
        source
            .children
            .insert(id(1), vec![paragraph(3, false), toggle(4)]);
        source.children.insert(id(4), vec![paragraph(5, false)]);
        source
    }

    #[tokio::test]
    async fn builds_nested_tree_in_document_order() {
        let tree = builder(nested_source(), BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap();

        assert!(tree.is_complete());
        assert_eq!(tree.requests, 3);
        let top: Vec<_> = tree.blocks.iter().map(text).collect();
        assert_eq!(top, vec!["p1", "p2"]);

        let p1 = &tree.blocks[0];
        let nested: Vec<_> = p1.children().iter().map(text).collect();
        assert_eq!(nested, vec!["p3", "t4"]);
        assert_eq!(text(&p1.children()[1].children()[0]), "p5");
        assert!(tree.blocks[1].common().children.is_none());
    }

    #[tokio::test]
    async fn stamps_child_level_one_below_parent() {
        let tree = builder(nested_source(), BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap();

        let mut stack: Vec<&Block> = tree.blocks.iter().collect();
        assert!(stack.iter().all(|b| b.indent_level() == 0));
        while let Some(block) = stack.pop() {
            for child in block.children() {
                assert_eq!(child.indent_level(), block.indent_level() + 1);
                stack.push(child);
            }
        }
    }

    #[tokio::test]
    async fn fan_out_keeps_sibling_order() {
        let mut source = TreeSource::default();
        let parents: Vec<Block> = (1..=8).map(|n| paragraph(n, true)).collect();
        source.children.insert(id(0), parents);
        for n in 1..=8 {
            source
                .children
                .insert(id(n), vec![paragraph(100 + n, false), paragraph(200 + n, false)]);
        }

        let tree = builder(
            source,
            BuildOptions {
                concurrency: 4,
                ..Default::default()
            },
        )
        .build(&id(0))
        .await
        .unwrap();

        for (i, parent) in tree.blocks.iter().enumerate() {
            let n = i as u32 + 1;
            let kids: Vec<_> = parent.children().iter().map(text).collect();
            assert_eq!(kids, vec![format!("p{}", 100 + n), format!("p{}", 200 + n)]);
        }
    }

    #[tokio::test]
    async fn depth_cap_stops_expansion_and_is_reported() {
        let tree = builder(
            nested_source(),
            BuildOptions {
                max_depth: 1,
                ..Default::default()
            },
        )
        .build(&id(0))
        .await
        .unwrap();

        let toggle = &tree.blocks[0].children()[1];
        assert_eq!(toggle.indent_level(), 1);
        assert!(toggle.common().children.is_none());
        assert_eq!(
            tree.warnings,
            vec![TreeWarning::DepthLimitReached {
                block_id: id(4),
                depth: 1
            }]
        );
    }

    #[tokio::test]
    async fn failed_subtree_is_reported_and_siblings_survive() {
        let mut source = TreeSource::default();
        source.children.insert(
            id(0),
            vec![paragraph(1, false), paragraph(2, true), paragraph(3, false)],
        );
        source.failing.insert(id(2));

        let tree = builder(source, BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap();

        let top: Vec<_> = tree.blocks.iter().map(text).collect();
        assert_eq!(top, vec!["p1", "p2", "p3"]);
        assert!(tree.blocks[1].common().children.is_none());
        assert!(matches!(
            &tree.warnings[..],
            [TreeWarning::ChildrenUnavailable { block_id, .. }] if *block_id == id(2)
        ));
    }

    #[tokio::test]
    async fn total_root_failure_is_an_error() {
        let mut source = TreeSource::default();
        source.failing.insert(id(0));

        let err = builder(source, BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RootFetchFailed { .. }));
    }

    #[tokio::test]
    async fn partial_root_listing_keeps_first_pages() {
        let mut source = TreeSource {
            chunk: 2,
            ..Default::default()
        };
        source.children.insert(
            id(0),
            (1..=5).map(|n| paragraph(n, false)).collect(),
        );
        source.failing_cursor.insert(id(0), "4".to_string());

        let tree = builder(source, BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap();

        assert_eq!(tree.blocks.len(), 4);
        assert_eq!(tree.requests, 3);
        assert!(matches!(
            &tree.warnings[..],
            [TreeWarning::ChildrenTruncated { kept: 4, .. }]
        ));
    }

    #[tokio::test]
    async fn repeated_block_is_expanded_once() {
        let mut source = TreeSource::default();
        source.children.insert(id(0), vec![toggle(1)]);
        // The toggle lists itself as its own child.
        source.children.insert(id(1), vec![toggle(1)]);

        let tree = builder(source, BuildOptions::default())
            .build(&id(0))
            .await
            .unwrap();

        assert_eq!(tree.blocks[0].children().len(), 1);
        assert!(tree.blocks[0].children()[0].common().children.is_none());
        assert_eq!(
            tree.warnings,
            vec![TreeWarning::RepeatedBlock { block_id: id(1) }]
        );
    }
}
