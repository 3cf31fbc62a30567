use crate::StrSpan;

/// A CDATA node:
/// `<![CDATA[content]]>`
#[derive(Debug, Clone, PartialEq)]
pub struct CdataNode<'src> {
    content: StrSpan<'src>,
}
impl<'src> CdataNode<'src> {
    /// Create a new CDATA node.
    pub(crate) fn new(content: impl Into<StrSpan<'src>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the content of the CDATA node, untouched.
    #[must_use]
    pub fn content(&self) -> &StrSpan<'src> {
        &self.content
    }
}
