use super::{Node, NodeName};
use crate::StrSpan;

/// A node in the document tree, with a name, attributes, and children:
/// `<name attr="value">...</name>`
///
/// Attributes keep their source order. Duplicate attributes are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode<'src> {
    span: StrSpan<'src>,
    name: NodeName<'src>,
    attributes: Vec<NodeAttribute<'src>>,
    children: Vec<Node<'src>>,
}
impl<'src> ElementNode<'src> {
    pub(crate) fn with_name(name: NodeName<'src>) -> Self {
        Self {
            span: StrSpan::default(),
            name,
            attributes: vec![],
            children: vec![],
        }
    }

    pub(crate) fn with_span(mut self, span: impl Into<StrSpan<'src>>) -> Self {
        self.span = span.into();
        self
    }

    pub(crate) fn push_child(&mut self, child: Node<'src>) {
        self.children.push(child);
    }

    pub(crate) fn push_attribute(&mut self, attribute: NodeAttribute<'src>) {
        self.attributes.push(attribute);
    }

    /// Get the span of the opening tag in the original source.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Get the name of the node.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Get the attributes of the node.
    #[must_use]
    pub fn attributes(&self) -> &[NodeAttribute<'src>] {
        &self.attributes
    }

    /// Get the children of the node.
    #[must_use]
    pub fn children(&self) -> &[Node<'src>] {
        &self.children
    }
}

/// An attribute set on a node, with a name and value:
/// `name="value"`
///
/// The value is kept verbatim, without unescaping.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttribute<'src> {
    name: NodeName<'src>,
    value: StrSpan<'src>,
}
impl<'src> NodeAttribute<'src> {
    pub(crate) fn new(name: NodeName<'src>, value: impl Into<StrSpan<'src>>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Returns the name of the attribute.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Returns the value of the attribute.
    #[must_use]
    pub fn value(&self) -> &StrSpan<'src> {
        &self.value
    }
}
