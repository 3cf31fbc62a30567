//! The types of nodes and related data that can appear in an XML document.
use super::StrSpan;

mod name;
pub use name::*;

mod text;
pub use text::*;

mod element;
pub use element::*;

mod cdata;
pub use cdata::*;

/// A node in the document tree. Can be any of:
/// - `Element` - a tag with attributes and children
/// - `Text` - a run of character data, kept untrimmed
/// - `Comment` - a comment node
/// - `Cdata` - a CDATA section
/// - `ProcessingInstruction` - a processing instruction, by target
/// - `DocumentType` - a `<!DOCTYPE>` declaration, by name
///
/// Every node owns its children; strings borrow from the parsed source.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// A tag node.
    Element(ElementNode<'src>),

    /// A text node.
    Text(TextNode<'src>),

    /// A comment node.
    Comment(StrSpan<'src>),

    /// A CDATA node.
    Cdata(CdataNode<'src>),

    /// A processing instruction node.
    ProcessingInstruction(StrSpan<'src>),

    /// A DTD node.
    DocumentType(StrSpan<'src>),
}
impl<'src> Node<'src> {
    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementNode<'src>> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// True for comments that contain nothing but whitespace.
    #[must_use]
    pub fn is_blank_comment(&self) -> bool {
        match self {
            Self::Comment(text) => text.trimmed().is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment() {
        assert!(Node::Comment(StrSpan::from("   ")).is_blank_comment());
        assert!(!Node::Comment(StrSpan::from(" note ")).is_blank_comment());
        assert!(!Node::Text(TextNode::new("   ")).is_blank_comment());
    }

    #[test]
    fn test_as_element() {
        let node = Node::Element(ElementNode::with_name(NodeName::new(None, "root")));
        let name = node.as_element().map(|e| e.name().to_string());
        assert_eq!(name.as_deref(), Some("root"));
        assert!(Node::Text(TextNode::new("x")).as_element().is_none());
    }
}
