//! Renders Notion block trees into Markdown.

pub mod block_renderer;
mod document;
mod rich_text;

pub use block_renderer::{render_block, render_node, NodeMarkup};
pub use document::{render_blocks, RenderOptions, RenderWarning, RenderedDocument};
pub use rich_text::{plain_text_of, render_inline};
