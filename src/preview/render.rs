//! Markdown to preview tree
//!
//! Builds a [`Node`] tree from pulldown-cmark events. Fenced code becomes
//! `pre > code`, diagram fences (`mermaid`) become a `div` carrying the
//! diagram's class, and embedded HTML is kept as [`Node::Raw`]. Consecutive
//! text events are coalesced into one text node.

use crate::preview::node::{Element, Node};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Class of the root element of a rendered preview
pub const PREVIEW_ROOT_CLASS: &str = "markdown-preview";

/// Fence languages rendered as diagram containers instead of code
const DIAGRAM_LANGS: &[&str] = &["mermaid"];

/// Render markdown source into a preview tree
pub fn render_markdown(source: &str) -> Node {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(source, options) {
        builder.push(event);
    }
    builder.finish()
}

struct TreeBuilder {
    stack: Vec<Element>,
    in_table_head: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Element::new("div").with_attr("class", PREVIEW_ROOT_CLASS)],
            in_table_head: false,
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open_tag(tag),
            Event::End(TagEnd::CodeBlock) => {
                if self.top_tag() == Some("code") {
                    self.close();
                }
                self.close();
            }
            Event::End(TagEnd::TableHead) => {
                self.in_table_head = false;
                self.close();
            }
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.append(
                Element::new("code")
                    .with_child(Node::text(code.to_string()))
                    .into(),
            ),
            Event::Html(html) | Event::InlineHtml(html) => self.append(Node::Raw(html.to_string())),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.append(Element::new("br").into()),
            Event::Rule => self.append(Element::new("hr").into()),
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input = input.with_attr("checked", "");
                }
                self.append(input.into());
            }
            Event::FootnoteReference(label) => {
                let link = Element::new("a")
                    .with_attr("href", format!("#{label}"))
                    .with_child(Node::text(label.to_string()));
                self.append(
                    Element::new("sup")
                        .with_attr("class", "footnote-reference")
                        .with_child(link.into())
                        .into(),
                );
            }
            other => tracing::trace!(?other, "ignoring markdown event"),
        }
    }

    fn open_tag(&mut self, tag: Tag<'_>) {
        let element = match tag {
            Tag::Paragraph => Element::new("p"),
            Tag::Heading { level, .. } => Element::new(heading_tag(level)),
            Tag::BlockQuote(_) => Element::new("blockquote"),
            Tag::CodeBlock(kind) => {
                self.open_code_block(kind);
                return;
            }
            Tag::HtmlBlock => Element::new("div").with_attr("class", "html-block"),
            Tag::List(Some(1)) => Element::new("ol"),
            Tag::List(Some(start)) => Element::new("ol").with_attr("start", start.to_string()),
            Tag::List(None) => Element::new("ul"),
            Tag::Item => Element::new("li"),
            Tag::FootnoteDefinition(label) => Element::new("div")
                .with_attr("class", "footnote-definition")
                .with_attr("id", label.to_string()),
            Tag::Table(_) => Element::new("table"),
            Tag::TableHead => {
                self.in_table_head = true;
                Element::new("thead")
            }
            Tag::TableRow => Element::new("tr"),
            Tag::TableCell if self.in_table_head => Element::new("th"),
            Tag::TableCell => Element::new("td"),
            Tag::Emphasis => Element::new("em"),
            Tag::Strong => Element::new("strong"),
            Tag::Strikethrough => Element::new("del"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link = Element::new("a").with_attr("href", dest_url.to_string());
                if title.is_empty() {
                    link
                } else {
                    link.with_attr("title", title.to_string())
                }
            }
            Tag::Image { dest_url, .. } => Element::new("img").with_attr("src", dest_url.to_string()),
            other => {
                tracing::trace!(?other, "unmapped markdown tag");
                Element::new("span")
            }
        };
        self.stack.push(element);
    }

    fn open_code_block(&mut self, kind: CodeBlockKind<'_>) {
        let lang = match &kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or("").to_string(),
            CodeBlockKind::Indented => String::new(),
        };

        if DIAGRAM_LANGS.contains(&lang.as_str()) {
            self.stack.push(Element::new("div").with_attr("class", lang));
            return;
        }

        self.stack.push(Element::new("pre"));
        let code = if lang.is_empty() {
            Element::new("code")
        } else {
            Element::new("code").with_attr("class", format!("language-{lang}"))
        };
        self.stack.push(code);
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            tracing::warn!("unbalanced end event in markdown stream");
            return;
        }
        if let Some(element) = self.stack.pop() {
            self.append(element.into());
        }
    }

    fn append(&mut self, node: Node) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    fn text(&mut self, text: &str) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        match top.children.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => top.children.push(Node::text(text)),
        }
    }

    fn top_tag(&self) -> Option<&str> {
        self.stack.last().map(|el| el.tag.as_str())
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .map(Node::from)
            .unwrap_or_else(|| Element::new("div").into())
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}
