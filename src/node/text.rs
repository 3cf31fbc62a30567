use crate::StrSpan;

/// A run of character data inside an element.
///
/// The text is stored exactly as it appears in the source, whitespace and entity references
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<'src> {
    text: StrSpan<'src>,
}
impl<'src> TextNode<'src> {
    /// Create a new text node.
    pub(crate) fn new(text: impl Into<StrSpan<'src>>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the raw text of the node.
    #[must_use]
    pub fn text(&self) -> &StrSpan<'src> {
        &self.text
    }

    /// Returns the text with leading and trailing whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &'src str {
        self.text.trimmed()
    }
}
