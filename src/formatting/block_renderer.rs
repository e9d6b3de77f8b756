// src/formatting/block_renderer.rs
//! Block rendering: converts one Notion block into Markdown fragments.
//!
//! Rendering a node never looks at its children; the document assembler
//! places them after the node's opening fragments and before its closing
//! ones.

use super::document::{render_blocks, RenderOptions, RenderWarning, RenderedDocument};
use super::rich_text::render_inline;
use crate::constants::*;
use crate::model::blocks::*;
use crate::model::Block;

/// The Markdown one block contributes around its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMarkup {
    /// Emitted before the block's children.
    pub opening: Vec<String>,
    /// Emitted after the block's children.
    pub closing: Vec<String>,
    /// Set when the block could not be rendered as it should have been.
    pub warning: Option<RenderWarning>,
}

impl NodeMarkup {
    fn empty() -> Self {
        Self::default()
    }

    fn line(fragment: String) -> Self {
        Self {
            opening: vec![fragment],
            ..Self::default()
        }
    }
}

/// Renders `block` and its fetched subtree.
pub fn render_block(block: &Block) -> RenderedDocument {
    render_blocks(std::slice::from_ref(block), &RenderOptions::default())
}

/// Renders the block itself, without its children.
pub fn render_node(block: &Block) -> NodeMarkup {
    let indent = " ".repeat(INDENT_SPACES * block.indent_level());

    match block {
        Block::Heading1(b) => heading(&indent, "#", &b.content),
        Block::Heading2(b) => heading(&indent, "##", &b.content),
        Block::Heading3(b) => heading(&indent, "###", &b.content),
        Block::Paragraph(b) => {
            NodeMarkup::line(format!("{}{}\n", indent, render_inline(&b.content.rich_text)))
        }
        Block::BulletedListItem(b) => NodeMarkup::line(format!(
            "{}- {}\n",
            indent,
            render_inline(&b.content.rich_text)
        )),
        Block::NumberedListItem(b) => NodeMarkup::line(format!(
            "{}1. {}\n",
            indent,
            render_inline(&b.content.rich_text)
        )),
        Block::ToDo(b) => NodeMarkup::line(format!(
            "{}[{}] {}\n",
            indent,
            if b.checked { "x" } else { " " },
            render_inline(&b.content.rich_text)
        )),
        Block::Quote(b) => NodeMarkup::line(format!(
            "\n{}> {}\n",
            indent,
            render_inline(&b.content.rich_text)
        )),
        Block::Callout(b) => render_callout(&indent, b),
        Block::Toggle(b) => NodeMarkup {
            opening: vec![format!(
                "\n{}<details><summary>{}</summary>\n",
                indent,
                render_inline(&b.content.rich_text)
            )],
            closing: vec![format!("{}</details>\n", indent)],
            warning: None,
        },
        Block::Code(b) => render_code(&indent, b),
        Block::Divider(_) => NodeMarkup::line(format!("{}---\n", indent)),
        Block::Image(b) => render_image(&indent, b),
        Block::Bookmark(b) => render_bookmark(&indent, b),
        Block::ChildPage(b) => NodeMarkup::line(format!(
            "\n{}## [Child Page: {}]({})\n",
            indent,
            non_empty_or(b.title.as_deref(), UNTITLED_CHILD_PAGE),
            block.id().to_dashed()
        )),
        Block::ChildDatabase(b) => NodeMarkup::line(format!(
            "\n{}## [Child Database: {}]({})\n",
            indent,
            non_empty_or(b.title.as_deref(), UNTITLED_CHILD_DATABASE),
            block.id().to_dashed()
        )),
        Block::Table(_) => NodeMarkup::line(format!("{}{}\n", indent, TABLE_BLOCK_PLACEHOLDER)),
        Block::Unsupported(_) => {
            NodeMarkup::line(format!("{}{}\n", indent, UNSUPPORTED_BLOCK_PLACEHOLDER))
        }
        Block::ColumnList(_) | Block::Column(_) | Block::Synced(_) => NodeMarkup::empty(),
        Block::Malformed(b) => NodeMarkup {
            warning: Some(RenderWarning::MalformedPayload {
                block_id: b.common.id.clone(),
                block_type: b.block_type.clone(),
                reason: b.reason.clone(),
            }),
            ..NodeMarkup::empty()
        },
    }
}

fn heading(indent: &str, marker: &str, content: &TextBlockContent) -> NodeMarkup {
    NodeMarkup::line(format!(
        "\n{}{} {}\n",
        indent,
        marker,
        render_inline(&content.rich_text)
    ))
}

fn render_callout(indent: &str, block: &CalloutBlock) -> NodeMarkup {
    let icon = block
        .icon
        .as_ref()
        .and_then(Icon::emoji)
        .unwrap_or(DEFAULT_CALLOUT_ICON);
    NodeMarkup::line(format!(
        "\n{}{} {}\n",
        indent,
        icon,
        render_inline(&block.content.rich_text)
    ))
}

fn render_code(indent: &str, block: &CodeBlock) -> NodeMarkup {
    let language = non_empty_or(block.language.as_deref(), DEFAULT_CODE_LANGUAGE);
    NodeMarkup::line(format!(
        "\n{indent}```{language}\n{code}\n{indent}```\n",
        code = render_inline(&block.content.rich_text)
    ))
}

fn render_image(indent: &str, block: &ImageBlock) -> NodeMarkup {
    let Some(url) = block.image.url() else {
        log::debug!("Image block {} has no URL; omitted", block.common.id);
        return NodeMarkup::empty();
    };
    let caption = render_inline(&block.caption);
    NodeMarkup::line(format!(
        "\n{}![{}]({})\n",
        indent,
        non_empty_or(Some(caption.as_str()), DEFAULT_IMAGE_ALT),
        url
    ))
}

fn render_bookmark(indent: &str, block: &BookmarkBlock) -> NodeMarkup {
    let Some(url) = block.url.as_deref().filter(|url| !url.is_empty()) else {
        log::debug!("Bookmark block {} has no URL; omitted", block.common.id);
        return NodeMarkup::empty();
    };
    let caption = render_inline(&block.caption);
    NodeMarkup::line(format!(
        "\n{}[Bookmark: {}]({})\n",
        indent,
        non_empty_or(Some(caption.as_str()), url),
        url
    ))
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockCommon;
    use crate::types::{BlockId, RichTextItem};
    use pretty_assertions::assert_eq;

    fn common(level: usize) -> BlockCommon {
        BlockCommon::new(BlockId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap())
            .at_level(level)
    }

    fn opening(block: Block) -> Vec<String> {
        render_node(&block).opening
    }

    #[test]
    fn headings_start_with_blank_line() {
        let block = Block::Heading2(Heading2Block {
            common: common(1),
            content: TextBlockContent::plain("Setup"),
        });
        assert_eq!(opening(block), vec!["\n  ## Setup\n"]);
    }

    #[test]
    fn checked_and_unchecked_todos() {
        let done = Block::ToDo(ToDoBlock {
            common: common(0),
            content: TextBlockContent::plain("Ship it"),
            checked: true,
        });
        let open = Block::ToDo(ToDoBlock {
            common: common(0),
            content: TextBlockContent::plain("Test it"),
            checked: false,
        });
        assert_eq!(opening(done), vec!["[x] Ship it\n"]);
        assert_eq!(opening(open), vec!["[ ] Test it\n"]);
    }

    #[test]
    fn callout_falls_back_to_bulb() {
        let plain = Block::Callout(CalloutBlock {
            common: common(0),
            icon: None,
            content: TextBlockContent::plain("Note"),
        });
        let with_icon = Block::Callout(CalloutBlock {
            common: common(0),
            icon: Some(Icon::Emoji {
                emoji: "⚠️".to_string(),
            }),
            content: TextBlockContent::plain("Careful"),
        });
        assert_eq!(opening(plain), vec!["\n💡 Note\n"]);
        assert_eq!(opening(with_icon), vec!["\n⚠️ Careful\n"]);
    }

    #[test]
    fn code_block_defaults_language() {
        let block = Block::Code(CodeBlock {
            common: common(1),
            language: None,
            content: TextBlockContent::plain("let x = 1;"),
        });
        assert_eq!(opening(block), vec!["\n  ```plaintext\nlet x = 1;\n  ```\n"]);
    }

    #[test]
    fn toggle_closes_after_children() {
        let markup = render_node(&Block::Toggle(ToggleBlock {
            common: common(0),
            content: TextBlockContent::plain("More"),
        }));
        assert_eq!(markup.opening, vec!["\n<details><summary>More</summary>\n"]);
        assert_eq!(markup.closing, vec!["</details>\n"]);
    }

    #[test]
    fn image_without_any_url_is_omitted() {
        let block = Block::Image(ImageBlock {
            common: common(0),
            image: FileObject::default(),
            caption: vec![],
        });
        assert!(render_node(&block).opening.is_empty());
        assert!(render_block(&block).fragments.is_empty());
    }

    #[test]
    fn image_caption_or_default_alt() {
        let captioned = Block::Image(ImageBlock {
            common: common(0),
            image: FileObject::external("https://cdn.example.com/a.png"),
            caption: vec![RichTextItem::plain_text("Chart")],
        });
        let bare = Block::Image(ImageBlock {
            common: common(0),
            image: FileObject::hosted("https://s3.example.com/b.png"),
            caption: vec![],
        });
        assert_eq!(
            opening(captioned),
            vec!["\n![Chart](https://cdn.example.com/a.png)\n"]
        );
        assert_eq!(opening(bare), vec!["\n![image](https://s3.example.com/b.png)\n"]);
    }

    #[test]
    fn bookmark_uses_url_when_caption_is_empty() {
        let block = Block::Bookmark(BookmarkBlock {
            common: common(0),
            url: Some("https://example.com".to_string()),
            caption: vec![],
        });
        assert_eq!(
            opening(block),
            vec!["\n[Bookmark: https://example.com](https://example.com)\n"]
        );

        let no_url = Block::Bookmark(BookmarkBlock {
            common: common(0),
            url: Some(String::new()),
            caption: vec![],
        });
        assert!(opening(no_url).is_empty());
    }

    #[test]
    fn child_page_is_a_reference() {
        let block = Block::ChildPage(ChildPageBlock {
            common: common(0),
            title: None,
        });
        assert_eq!(
            opening(block),
            vec!["\n## [Child Page: Untitled Child Page](59833787-2cf9-4fdf-8782-e53db20768a5)\n"]
        );
    }

    #[test]
    fn placeholders_for_tables_and_unknown_types() {
        let table = Block::Table(TableBlock {
            common: common(1),
            table_width: 3,
            has_column_header: true,
            has_row_header: false,
        });
        let unknown = Block::Unsupported(UnsupportedBlock {
            common: common(0),
            block_type: "equation".to_string(),
        });
        assert_eq!(
            opening(table),
            vec!["  [Table Block - Requires further processing]\n"]
        );
        assert_eq!(opening(unknown), vec!["[Unsupported Block Type]\n"]);
    }

    #[test]
    fn layout_blocks_emit_nothing() {
        let column = Block::Column(ColumnBlock { common: common(0) });
        assert_eq!(render_node(&column), NodeMarkup::default());
    }

    #[test]
    fn malformed_block_warns_instead_of_rendering() {
        let markup = render_node(&Block::Malformed(MalformedBlock {
            common: common(0),
            block_type: "quote".to_string(),
            reason: "missing field `rich_text`".to_string(),
        }));
        assert!(markup.opening.is_empty());
        assert!(matches!(
            markup.warning,
            Some(RenderWarning::MalformedPayload { ref block_type, .. }) if block_type == "quote"
        ));
    }
}
