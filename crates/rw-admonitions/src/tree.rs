//! Owned structural tree for parsed markdown.
//!
//! pulldown-cmark produces a flat event stream; [`Node`] nests it so a pipeline
//! stage can hold the document as a value and replace it wholesale.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag};

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

/// Node type and its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum NodeKind {
    /// Root of every tree.
    Document,
    Paragraph,
    Heading {
        /// 1 to 6.
        level: u8,
    },
    BlockQuote,
    CodeBlock {
        /// Fence info string; `None` for indented code.
        info: Option<String>,
    },
    /// Raw HTML block; its content is held in [`NodeKind::Html`] children.
    HtmlBlock,
    List {
        /// First number of an ordered list; `None` for bullet lists.
        start: Option<u64>,
    },
    /// List item.
    Item,
    FootnoteDefinition {
        label: String,
    },
    Table,
    TableHead,
    TableRow,
    TableCell,
    /// `*text*`
    Emphasis,
    /// `**text**`
    Strong,
    /// `~~text~~`
    Strikethrough,
    Link {
        /// Destination as written.
        url: String,
        /// Empty when the link has no title.
        title: String,
    },
    Image {
        /// Source as written.
        url: String,
        /// Empty when the image has no title.
        title: String,
    },
    /// Plain text, merged across adjacent events.
    Text {
        value: String,
    },
    /// Inline code span.
    Code {
        value: String,
    },
    /// Raw HTML content of an [`NodeKind::HtmlBlock`], merged across lines.
    Html {
        value: String,
    },
    /// Raw HTML within a paragraph.
    InlineHtml {
        value: String,
    },
    /// `[^label]` reference.
    FootnoteReference {
        label: String,
    },
    SoftBreak,
    HardBreak,
    /// Thematic break.
    Rule,
    /// `[ ]` or `[x]` at the start of a task list item.
    TaskListMarker {
        checked: bool,
    },
    /// Construct without a dedicated variant (definition lists, math, metadata).
    Other {
        /// pulldown-cmark tag or event name.
        name: String,
    },
}

impl Node {
    /// Create a node without children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Create an empty document root.
    #[must_use]
    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    /// Build a tree from a pulldown-cmark event stream.
    ///
    /// Adjacent text and adjacent HTML events are merged so the same source
    /// always yields the same tree regardless of how the parser chunks it.
    pub fn from_events<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Self {
        let mut stack = vec![Self::document()];

        for event in events {
            match event {
                Event::Start(tag) => stack.push(Self::new(tag_kind(&tag))),
                Event::End(_) => {
                    // The root is never popped; an unbalanced End is ignored.
                    if stack.len() > 1
                        && let Some(node) = stack.pop()
                        && let Some(parent) = stack.last_mut()
                    {
                        parent.children.push(node);
                    }
                }
                event => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_leaf(leaf_kind(event));
                    }
                }
            }
        }

        // Close anything left open by a truncated stream.
        while stack.len() > 1 {
            if let Some(node) = stack.pop()
                && let Some(parent) = stack.last_mut()
            {
                parent.children.push(node);
            }
        }
        stack.pop().unwrap_or_else(Self::document)
    }

    fn push_leaf(&mut self, kind: NodeKind) {
        if let Some(last) = self.children.last_mut()
            && last.children.is_empty()
        {
            match (&mut last.kind, &kind) {
                (NodeKind::Text { value }, NodeKind::Text { value: more })
                | (NodeKind::Html { value }, NodeKind::Html { value: more }) => {
                    value.push_str(more);
                    return;
                }
                _ => {}
            }
        }
        self.children.push(Self::new(kind));
    }

    /// Visit this node and all descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Concatenated text and inline code content of this subtree.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node| match &node.kind {
            NodeKind::Text { value } | NodeKind::Code { value } => out.push_str(value),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {}
        });
        out
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::document()
    }
}

fn tag_kind(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: heading_level_to_num(*level),
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::CodeBlock {
            info: Some(info.to_string()),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::CodeBlock { info: None },
        Tag::HtmlBlock => NodeKind::HtmlBlock,
        Tag::List(start) => NodeKind::List { start: *start },
        Tag::Item => NodeKind::Item,
        Tag::FootnoteDefinition(label) => NodeKind::FootnoteDefinition {
            label: label.to_string(),
        },
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link {
            dest_url, title, ..
        } => NodeKind::Link {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => NodeKind::Image {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        other => NodeKind::Other {
            name: variant_name(other),
        },
    }
}

fn leaf_kind(event: Event<'_>) -> NodeKind {
    match event {
        Event::Text(text) => NodeKind::Text {
            value: text.into_string(),
        },
        Event::Code(code) => NodeKind::Code {
            value: code.into_string(),
        },
        Event::Html(html) => NodeKind::Html {
            value: html.into_string(),
        },
        Event::InlineHtml(html) => NodeKind::InlineHtml {
            value: html.into_string(),
        },
        Event::FootnoteReference(label) => NodeKind::FootnoteReference {
            label: label.into_string(),
        },
        Event::SoftBreak => NodeKind::SoftBreak,
        Event::HardBreak => NodeKind::HardBreak,
        Event::Rule => NodeKind::Rule,
        Event::TaskListMarker(checked) => NodeKind::TaskListMarker { checked },
        other => NodeKind::Other {
            name: variant_name(&other),
        },
    }
}

/// Variant name from the `Debug` representation (`Superscript`, `InlineMath(..)` → `InlineMath`).
fn variant_name(value: &impl std::fmt::Debug) -> String {
    let debug = format!("{value:?}");
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_owned()
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    use super::*;

    fn parse(markdown: &str) -> Node {
        Node::from_events(Parser::new(markdown))
    }

    fn text(value: &str) -> Node {
        Node::new(NodeKind::Text {
            value: value.to_owned(),
        })
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(""), Node::document());
    }

    #[test]
    fn test_paragraph_and_heading() {
        let tree = parse("# Title\n\nHello *world*\n");
        assert_eq!(
            tree,
            Node {
                kind: NodeKind::Document,
                children: vec![
                    Node {
                        kind: NodeKind::Heading { level: 1 },
                        children: vec![text("Title")],
                    },
                    Node {
                        kind: NodeKind::Paragraph,
                        children: vec![
                            text("Hello "),
                            Node {
                                kind: NodeKind::Emphasis,
                                children: vec![text("world")],
                            },
                        ],
                    },
                ],
            }
        );
    }

    #[test]
    fn test_html_block_lines_merged() {
        let tree = parse("<div class=\"x\">\n<p>inner</p>\n</div>\n");
        assert_eq!(tree.children.len(), 1);
        let block = &tree.children[0];
        assert_eq!(block.kind, NodeKind::HtmlBlock);
        assert_eq!(
            block.children,
            vec![Node::new(NodeKind::Html {
                value: "<div class=\"x\">\n<p>inner</p>\n</div>\n".to_owned()
            })]
        );
    }

    #[test]
    fn test_code_block_info() {
        let tree = parse("```rust\nfn main() {}\n```\n\n    indented\n");
        assert_eq!(
            tree.children[0].kind,
            NodeKind::CodeBlock {
                info: Some("rust".to_owned())
            }
        );
        assert_eq!(tree.children[1].kind, NodeKind::CodeBlock { info: None });
    }

    #[test]
    fn test_list_and_link() {
        let tree = parse("3. [docs](/guide.md \"Guide\")\n");
        let list = &tree.children[0];
        assert_eq!(list.kind, NodeKind::List { start: Some(3) });
        let mut links = Vec::new();
        tree.walk(&mut |node| {
            if let NodeKind::Link { url, title } = &node.kind {
                links.push((url.clone(), title.clone()));
            }
        });
        assert_eq!(links, vec![("/guide.md".to_owned(), "Guide".to_owned())]);
    }

    #[test]
    fn test_text_content() {
        let tree = parse("Use `cargo` and\n**read** docs.\n");
        assert_eq!(tree.text(), "Use cargo and read docs.");
    }

    #[test]
    fn test_walk_visits_in_order() {
        let tree = parse("a\n\nb\n");
        let mut kinds = Vec::new();
        tree.walk(&mut |node| kinds.push(node.kind.clone()));
        assert_eq!(
            kinds,
            vec![
                NodeKind::Document,
                NodeKind::Paragraph,
                NodeKind::Text {
                    value: "a".to_owned()
                },
                NodeKind::Paragraph,
                NodeKind::Text {
                    value: "b".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(variant_name(&Tag::Superscript), "Superscript");
        assert_eq!(variant_name(&Event::InlineMath("x".into())), "InlineMath");
    }
}
