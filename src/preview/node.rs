use std::fmt::Write as _;

/// Tag of the wrapper inserted around highlighted text
pub const MARK_TAG: &str = "mark";

/// Class identifying wrappers inserted by the search highlighter
pub const MARK_CLASS: &str = "search-highlight";

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// A node of the rendered preview tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
    /// Renderer output passed through verbatim (embedded HTML and the like)
    Raw(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// A highlight wrapper around `text`
    pub fn marker(text: impl Into<String>) -> Self {
        Element::new(MARK_TAG)
            .with_attr("class", MARK_CLASS)
            .with_child(Node::Text(text.into()))
            .into()
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Node::Element(el) if el.tag == MARK_TAG && el.has_class(MARK_CLASS))
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            Node::Raw(_) => {}
        }
    }

    /// Number of highlight wrappers in this subtree
    pub fn count_markers(&self) -> usize {
        match self {
            Node::Element(el) => {
                usize::from(self.is_marker())
                    + el.children.iter().map(Node::count_markers).sum::<usize>()
            }
            _ => 0,
        }
    }

    /// Serialize as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(out, text, false),
            Node::Raw(raw) => out.push_str(raw),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {name}=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                if el.tag == "img" {
                    out.push_str(" alt=\"");
                    escape_into(out, &self.text_content(), true);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag.as_str()) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
