//! XML pretty-printing
//!
//! Use [`Document::to_pretty_xml`] unless you need to write the XML to a file or other writer.
//!
//! Layout rules, applied recursively from the document down:
//! - Elements without children are written self-closing: `<name a="1"/>`
//! - Elements whose children are all text are written on one line, with each text run trimmed
//! - Any other element gets its children on their own lines, one [`INDENT`] deeper
//! - Blank comments are dropped, other comments are trimmed
//! - CDATA is written untouched; processing instructions and DOCTYPEs are dropped
//!
//! Nothing is escaped or unescaped on the way through.
use crate::{Document, ElementNode, Node};
use tracing::trace;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Render a document as indented XML, starting at `depth`.
///
/// Trailing whitespace is trimmed from the result.
#[must_use]
pub fn format_document(document: &Document<'_>, depth: usize) -> String {
    let rendered = document
        .children()
        .iter()
        .map(|child| format_node(child, depth))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    rendered.trim_end().to_string()
}

/// Flatten a document as indented XML using the given writer.
///
/// # Errors
/// This function will return an error if the writer fails to write the XML string.
pub fn write_pretty(
    writer: &mut dyn std::io::Write,
    document: &Document<'_>,
    depth: usize,
) -> std::io::Result<()> {
    writer.write_all(format_document(document, depth).as_bytes())
}

/// Render a single node at `depth`. Returns an empty string for nodes that produce no output.
#[must_use]
pub fn format_node(node: &Node<'_>, depth: usize) -> String {
    let tab = INDENT.repeat(depth);

    match node {
        Node::Element(element) => format_element(element, depth),

        Node::Text(text) => {
            let text = text.trimmed();
            if text.is_empty() {
                String::new()
            } else {
                format!("{tab}{text}")
            }
        }

        Node::Cdata(cdata) => format!("{tab}<![CDATA[{}]]>", cdata.content()),

        Node::Comment(comment) => format!("{tab}<!--{}-->", comment.trimmed()),

        Node::ProcessingInstruction(target) => {
            trace!(pi = %target, "dropping processing instruction");
            String::new()
        }

        Node::DocumentType(name) => {
            trace!(doctype = %name, "dropping DOCTYPE");
            String::new()
        }
    }
}

fn format_element(element: &ElementNode<'_>, depth: usize) -> String {
    let tab = INDENT.repeat(depth);
    let name = element.name();

    let attributes: String = element
        .attributes()
        .iter()
        .map(|attr| {
            let value = attr.value().as_str();
            if value.contains('"') {
                format!(" {}='{value}'", attr.name())
            } else {
                format!(r#" {}="{value}""#, attr.name())
            }
        })
        .collect();

    let children: Vec<&Node<'_>> = element
        .children()
        .iter()
        .filter(|child| !child.is_blank_comment())
        .collect();

    if children.is_empty() {
        return format!("{tab}<{name}{attributes}/>");
    }

    if children.iter().all(|child| child.is_text()) {
        let text: String = children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.trimmed()),
                _ => None,
            })
            .collect();
        return format!("{tab}<{name}{attributes}>{text}</{name}>");
    }

    let mut lines = vec![format!("{tab}<{name}{attributes}>")];
    for child in children {
        let rendered = format_node(child, depth + 1);
        let rendered = rendered.trim_end();
        if !rendered.is_empty() {
            lines.push(rendered.to_string());
        }
    }
    lines.push(format!("{tab}</{name}>"));

    lines.join("\n")
}
