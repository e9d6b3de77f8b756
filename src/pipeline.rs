// src/pipeline.rs
//! The export pipeline: resolve a page, build its tree, render it.
//!
//! Only failures that leave nothing to export surface as errors. Anything
//! lost below the root travels alongside the Markdown as warnings.

use crate::analytics::{measure_tree, TreeStats};
use crate::api::{BlockTreeBuilder, BuildOptions, ContentSource, TreeWarning};
use crate::discovery::resolve_log_page;
use crate::error::AppError;
use crate::formatting::{render_blocks, RenderOptions, RenderWarning};
use crate::types::{BlockId, PageId, RenderedMarkdown};
use std::sync::Arc;

/// Which page an export starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// A page named directly by ID or URL.
    Page(PageId),
    /// The n-th log page in workspace search order.
    LogIndex(usize),
}

/// Limits applied to one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub build: BuildOptions,
    pub render: RenderOptions,
}

/// One exported page and everything known about how complete it is.
#[derive(Debug, Clone)]
pub struct ExportedPage {
    pub page: PageId,
    pub markdown: RenderedMarkdown,
    pub tree_warnings: Vec<TreeWarning>,
    pub render_warnings: Vec<RenderWarning>,
    pub stats: TreeStats,
    /// Page requests issued while building the tree.
    pub requests: usize,
}

impl ExportedPage {
    /// Whether any content was skipped, cut off or unreadable.
    pub fn is_degraded(&self) -> bool {
        !self.tree_warnings.is_empty() || !self.render_warnings.is_empty()
    }

    /// Every warning as a display line, tree warnings first.
    pub fn warning_messages(&self) -> Vec<String> {
        self.tree_warnings
            .iter()
            .map(ToString::to_string)
            .chain(self.render_warnings.iter().map(ToString::to_string))
            .collect()
    }
}

/// Exports pages from one content source.
pub struct PageExporter {
    source: Arc<dyn ContentSource>,
    options: ExportOptions,
}

impl PageExporter {
    pub fn new(source: Arc<dyn ContentSource>, options: ExportOptions) -> Self {
        Self { source, options }
    }

    /// Turns a target into a concrete page ID.
    pub async fn resolve(&self, target: &PageTarget) -> Result<PageId, AppError> {
        match target {
            PageTarget::Page(id) => Ok(id.clone()),
            PageTarget::LogIndex(index) => resolve_log_page(self.source.as_ref(), *index).await,
        }
    }

    /// Resolves `target` and exports it.
    pub async fn export_target(&self, target: &PageTarget) -> Result<ExportedPage, AppError> {
        let page = self.resolve(target).await?;
        self.export(&page).await
    }

    /// Builds the page's block tree and renders it to Markdown.
    pub async fn export(&self, page: &PageId) -> Result<ExportedPage, AppError> {
        log::info!("Exporting page {}", page);

        let builder = BlockTreeBuilder::new(Arc::clone(&self.source), self.options.build.clone());
        let tree = builder.build(&BlockId::from(page)).await?;
        for warning in &tree.warnings {
            log::warn!("Tree warning: {}", warning);
        }

        let stats = measure_tree(&tree.blocks);
        let document = render_blocks(&tree.blocks, &self.options.render);
        let markdown = document.markdown();

        log::info!(
            "Exported {}: {} block(s), depth {}, {} bytes",
            page,
            stats.total_blocks,
            stats.deepest_nesting,
            markdown.len()
        );

        Ok(ExportedPage {
            page: page.clone(),
            markdown,
            tree_warnings: tree.warnings,
            render_warnings: document.warnings,
            stats,
            requests: tree.requests,
        })
    }
}
