//! Rich-text markup generation from export content trees.
//!
//! The export stores text as a tree of `div` containers, `p` paragraphs and
//! styled `span` runs. The renderer wants one flat HTML-like string, so the
//! tree is read into [`ContentNode`]s and then flattened depth-first.

use crate::raw::RawRecord;
use serde_json::Value;

/// Inline style of a text run. Only these four properties are carried over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub color: Option<String>,
    pub font_size: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
}

impl SpanStyle {
    fn from_raw(raw: RawRecord<'_>) -> Self {
        Self {
            color: raw.non_empty_scalar("color"),
            font_size: raw.non_empty_scalar("font-size"),
            font_family: raw.non_empty_scalar("font-family"),
            font_weight: raw.non_empty_scalar("font-weight"),
        }
    }

    /// CSS declarations in emission order.
    fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("color", &self.color),
            ("font-size", &self.font_size),
            ("font-family", &self.font_family),
            ("font-weight", &self.font_weight),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }
}

/// A node of the export's rich-text tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// `div` block.
    Container { children: Vec<ContentNode> },
    /// `p` block with optional alignment.
    Paragraph {
        text_align: Option<String>,
        children: Vec<ContentNode>,
    },
    /// Styled text run.
    Span { text: String, style: SpanStyle },
}

impl ContentNode {
    /// Read one raw node. Unknown node types yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = RawRecord::new(value);
        let node = match raw.str("type")? {
            "div" => ContentNode::Container {
                children: Self::children_of(raw),
            },
            "p" => ContentNode::Paragraph {
                text_align: raw
                    .record("style")
                    .and_then(|style| style.non_empty_scalar("text-align")),
                children: Self::children_of(raw),
            },
            "span" => ContentNode::Span {
                text: raw.non_empty_scalar("text").unwrap_or_default(),
                style: raw.record("style").map(SpanStyle::from_raw).unwrap_or_default(),
            },
            other => {
                log::trace!("Dropping content node of unknown type {:?}", other);
                return None;
            }
        };
        Some(node)
    }

    /// Read a raw node list. Absent or non-array input is an empty list.
    pub fn list_from_value(value: Option<&Value>) -> Vec<Self> {
        value
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }

    fn children_of(raw: RawRecord<'_>) -> Vec<Self> {
        Self::list_from_value(raw.get("content"))
    }
}

/// Flattens content trees into markup strings.
#[derive(Debug, Clone, Default)]
pub struct MarkupSerializer {
    /// Whether to escape text and attribute values.
    escape_text: bool,
}

impl MarkupSerializer {
    /// Create a serializer that emits text verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `& < > " '` are escaped in text and attribute values.
    ///
    /// Off by default: export text is copied into the markup as-is.
    pub fn with_escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    /// Serialize a raw content value (expected to be an array of nodes).
    pub fn serialize_value(&self, content: Option<&Value>) -> String {
        self.serialize(&ContentNode::list_from_value(content))
    }

    /// Serialize a node list, concatenating siblings without separators.
    pub fn serialize(&self, nodes: &[ContentNode]) -> String {
        let mut out = String::new();
        self.write_nodes(nodes, &mut out);
        out
    }

    fn write_nodes(&self, nodes: &[ContentNode], out: &mut String) {
        for node in nodes {
            self.write_node(node, out);
        }
    }

    fn write_node(&self, node: &ContentNode, out: &mut String) {
        match node {
            ContentNode::Container { children } => {
                out.push_str("<div>");
                self.write_nodes(children, out);
                out.push_str("</div>");
            }
            ContentNode::Paragraph {
                text_align,
                children,
            } => {
                out.push_str("<p");
                if let Some(align) = text_align {
                    out.push_str(" style=\"text-align: ");
                    self.push_text(align, out);
                    out.push('"');
                }
                out.push('>');
                self.write_nodes(children, out);
                out.push_str("</p>");
            }
            ContentNode::Span { text, style } => {
                out.push_str("<span");
                let mut declarations = style.declarations().peekable();
                if declarations.peek().is_some() {
                    out.push_str(" style=\"");
                    for (i, (name, value)) in declarations.enumerate() {
                        if i > 0 {
                            out.push_str("; ");
                        }
                        out.push_str(name);
                        out.push_str(": ");
                        self.push_text(value, out);
                    }
                    out.push('"');
                }
                out.push('>');
                self.push_text(text, out);
                out.push_str("</span>");
            }
        }
    }

    fn push_text(&self, text: &str, out: &mut String) {
        if !self.escape_text {
            out.push_str(text);
            return;
        }
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
    }
}

/// Serialize raw export content with the default (non-escaping) serializer.
pub fn serialize_content(content: &Value) -> String {
    MarkupSerializer::new().serialize_value(Some(content))
}
