use crate::{
    StrSpan,
    error::{XmlErrorKind, XmlResult, bail},
    node::{CdataNode, ElementNode, Node, NodeAttribute, NodeName, TextNode},
};
use std::io::Write;
use tracing::trace;
use xmlparser::{ElementEnd, Token};

/// Deepest element nesting accepted by the parser.
///
/// The tree is formatted and dropped recursively, so deeper documents are rejected up front.
pub const MAX_DEPTH: usize = 256;

/// An XML document that has been parsed into a tree.
/// All strings in the tree are references into the source string.
///
/// The top level of the tree contains, in source order:
/// - Any items before the root node (DTD, comments, processing instructions)
/// - The root node itself, which owns the rest of the tree
/// - Any items after the root node (comments, processing instructions)
///
/// Other things to note:
/// - The `<?xml ... ?>` declaration is consumed and not kept in the tree
/// - Text is kept raw; whitespace-only runs between elements are still text nodes
/// - The parser does not recover from mismatched closing tags, or unclosed tags.
/// - Elements nested deeper than [`MAX_DEPTH`] are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'src> {
    children: Vec<Node<'src>>,
}
impl<'src> Document<'src> {
    /// Parses a document from the given source string.
    ///
    /// # Errors
    /// Returns errors if the XML is not well-formed
    ///
    /// # Example
    /// ```rust
    /// use bodyfmt::Document;
    /// let doc = Document::parse("<test><test2>test</test2></test>").unwrap();
    /// assert_eq!(doc.root().unwrap().name(), "test");
    /// ```
    pub fn parse(src: &'src str) -> XmlResult<Self> {
        parse_document(src)
    }

    /// The top-level nodes of the document, in source order.
    #[must_use]
    pub fn children(&self) -> &[Node<'src>] {
        &self.children
    }

    /// The root element of the document.
    #[must_use]
    pub fn root(&self) -> Option<&ElementNode<'src>> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Renders the document as indented XML, starting at the given depth.
    ///
    /// See [`crate::pretty`] for the layout rules.
    ///
    /// # Example
    /// ```rust
    /// use bodyfmt::Document;
    /// let doc = Document::parse("<root><child attr=\"1\">text</child></root>").unwrap();
    /// assert_eq!(
    ///     doc.to_pretty_xml(0),
    ///     "<root>\n  <child attr=\"1\">text</child>\n</root>"
    /// );
    /// ```
    #[must_use]
    pub fn to_pretty_xml(&self, depth: usize) -> String {
        crate::pretty::format_document(self, depth)
    }

    /// Writes the indented XML for this document to the given writer.
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn write_pretty_xml<W: Write>(
        &self,
        writer: &mut W,
        depth: usize,
    ) -> std::io::Result<()> {
        crate::pretty::write_pretty(writer, self, depth)
    }
}

#[derive(PartialEq, Debug)]
enum ParserState {
    Prolog,
    Dtd,
    TagAttributes,
    TagChildren,
    Epilog,
}

#[expect(clippy::too_many_lines, reason = "State machine; what did you expect")]
fn parse_document(src: &str) -> XmlResult<Document<'_>> {
    trace!(len = src.len(), "parsing xml document");

    let mut tokenizer = xmlparser::Tokenizer::from(src);
    let mut state = ParserState::Prolog;
    let mut stack: Vec<ElementNode<'_>> = vec![];
    let mut children = vec![];

    loop {
        let Some(next) = tokenizer.next() else {
            if let Some(last) = stack.pop() {
                let kind = XmlErrorKind::UnclosedTag(last.name().to_string());
                bail!(src, *last.span(), kind);
            }

            if state != ParserState::Epilog {
                bail!(src, XmlErrorKind::UnexpectedEof);
            }

            return Ok(Document { children });
        };
        let next = match next {
            Ok(token) => token,
            Err(e) => {
                let start = offset_of(src, e.pos());
                let span = StrSpan::new(src.get(start..).unwrap_or_default(), start);
                bail!(src, span, XmlErrorKind::Xml(e));
            }
        };
        let span: StrSpan<'_> = token_span(&next).into();

        match state {
            ParserState::Prolog => match next {
                Token::ElementStart { prefix, local, span } => {
                    let name = NodeName::from_tokens(prefix, local);
                    stack.push(ElementNode::with_name(name).with_span(span));
                    state = ParserState::TagAttributes;
                }

                Token::Declaration { .. } => trace!("skipping xml declaration"),

                Token::Comment { text, .. } => children.push(Node::Comment(text.into())),

                Token::ProcessingInstruction { target, .. } => {
                    children.push(Node::ProcessingInstruction(target.into()));
                }

                Token::EmptyDtd { name, .. } => children.push(Node::DocumentType(name.into())),

                Token::DtdStart { name, .. } => {
                    children.push(Node::DocumentType(name.into()));
                    state = ParserState::Dtd;
                }

                Token::Text { text } if text.as_str().trim().is_empty() => {}

                _ => bail!(src, span, msg = "Unexpected {} in prolog section", token_name(&next)),
            },

            ParserState::Dtd => match next {
                Token::EntityDeclaration { .. } => {}
                Token::DtdEnd { .. } => state = ParserState::Prolog,
                _ => bail!(src, span, msg = "Unexpected {} inside DOCTYPE", token_name(&next)),
            },

            ParserState::TagAttributes => match next {
                Token::Attribute { prefix, local, value, .. } => {
                    let Some(node) = stack.last_mut() else {
                        bail!(src, span, msg = "Bug; Cannot apply attribute; stack is empty!");
                    };

                    let name = NodeName::from_tokens(prefix, local);
                    node.push_attribute(NodeAttribute::new(name, value));
                }

                Token::ElementEnd { end: ElementEnd::Open, .. } => {
                    state = ParserState::TagChildren;
                }

                Token::ElementEnd { end: ElementEnd::Empty, .. } => {
                    let Some(node) = stack.pop() else {
                        bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                    };

                    state = attach(node, &mut stack, &mut children);
                }

                _ => bail!(src, span, msg = "Unexpected {} in tag attributes", token_name(&next)),
            },

            ParserState::TagChildren => {
                let Some(node) = stack.last_mut() else {
                    bail!(src, span, msg = "Bug; Cannot add child; stack is empty!");
                };

                match next {
                    Token::ElementStart { prefix, local, span } => {
                        if stack.len() >= MAX_DEPTH {
                            bail!(src, span.into(), XmlErrorKind::TooDeep(MAX_DEPTH));
                        }

                        let name = NodeName::from_tokens(prefix, local);
                        stack.push(ElementNode::with_name(name).with_span(span));
                        state = ParserState::TagAttributes;
                    }

                    Token::Text { text } => node.push_child(Node::Text(TextNode::new(text))),

                    Token::Cdata { text, .. } => {
                        node.push_child(Node::Cdata(CdataNode::new(text)));
                    }

                    Token::Comment { text, .. } => node.push_child(Node::Comment(text.into())),

                    Token::ProcessingInstruction { target, .. } => {
                        node.push_child(Node::ProcessingInstruction(target.into()));
                    }

                    Token::ElementEnd { end: ElementEnd::Close(prefix, local), .. } => {
                        let name = NodeName::from_tokens(prefix, local);
                        if *node.name() != name {
                            bail!(
                                src,
                                span,
                                XmlErrorKind::MismatchedTag {
                                    expected: node.name().to_string(),
                                    found: name.to_string(),
                                }
                            );
                        }

                        let Some(node) = stack.pop() else {
                            bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                        };
                        state = attach(node, &mut stack, &mut children);
                    }

                    _ => bail!(src, span, msg = "Unexpected {} inside tag", token_name(&next)),
                }
            }

            ParserState::Epilog => match next {
                Token::Comment { text, .. } => children.push(Node::Comment(text.into())),

                Token::ProcessingInstruction { target, .. } => {
                    children.push(Node::ProcessingInstruction(target.into()));
                }

                Token::Text { text } if text.as_str().trim().is_empty() => {}

                _ => bail!(src, span, msg = "Unexpected {} after root", token_name(&next)),
            },
        }
    }
}

/// Moves a closed element into its parent, or into the document if it was the root.
fn attach<'src>(
    node: ElementNode<'src>,
    stack: &mut [ElementNode<'src>],
    children: &mut Vec<Node<'src>>,
) -> ParserState {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(Node::Element(node));
        ParserState::TagChildren
    } else {
        children.push(Node::Element(node));
        ParserState::Epilog
    }
}

fn token_span<'a>(token: &Token<'a>) -> xmlparser::StrSpan<'a> {
    match *token {
        Token::Declaration { span, .. }
        | Token::ProcessingInstruction { span, .. }
        | Token::Comment { span, .. }
        | Token::DtdStart { span, .. }
        | Token::EmptyDtd { span, .. }
        | Token::EntityDeclaration { span, .. }
        | Token::DtdEnd { span }
        | Token::ElementStart { span, .. }
        | Token::Attribute { span, .. }
        | Token::ElementEnd { span, .. }
        | Token::Cdata { span, .. } => span,
        Token::Text { text } => text,
    }
}

fn token_name(token: &Token<'_>) -> &'static str {
    match token {
        Token::Declaration { .. } => "declaration",
        Token::ProcessingInstruction { .. } => "processing instruction",
        Token::Comment { .. } => "comment",
        Token::DtdStart { .. } | Token::EmptyDtd { .. } => "DOCTYPE",
        Token::EntityDeclaration { .. } => "entity declaration",
        Token::DtdEnd { .. } => "end of DOCTYPE",
        Token::ElementStart { .. } => "opening tag",
        Token::Attribute { .. } => "attribute",
        Token::ElementEnd { .. } => "end of tag",
        Token::Text { .. } => "text",
        Token::Cdata { .. } => "CDATA section",
    }
}

/// Converts the tokenizer's 1-based row/column into a byte offset.
fn offset_of(src: &str, pos: xmlparser::TextPos) -> usize {
    let (row, col) = (pos.row as usize, pos.col as usize);
    let (mut r, mut c) = (1, 1);
    for (i, ch) in src.char_indices() {
        if r == row && c == col {
            return i;
        }
        if ch == '\n' {
            r += 1;
            c = 1;
        } else {
            c += 1;
        }
    }
    src.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse("<test><test2>test</test2></test>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.name(), "test");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_text_is_kept_raw() {
        let doc = Document::parse("<a>\n  <b> x &amp; y </b>\n</a>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.children().len(), 3);
        assert!(root.children()[0].is_text());

        let b = root.children()[1].as_element().unwrap();
        match &b.children()[0] {
            Node::Text(text) => assert_eq!(text.text().as_str(), " x &amp; y "),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_attributes_in_source_order() {
        let doc = Document::parse(r#"<a z="1" y="2" x:w="3"/>"#).unwrap();
        let names: Vec<String> = doc
            .root()
            .unwrap()
            .attributes()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, ["z", "y", "x:w"]);
    }

    #[test]
    fn test_prolog_and_epilog() {
        let src = "<?xml version=\"1.0\"?><!DOCTYPE note><!-- Comment --><root></root><?pi?>";
        let doc = Document::parse(src).unwrap();
        assert_eq!(doc.children().len(), 4);
        assert!(matches!(doc.children()[0], Node::DocumentType(_)));
        assert!(matches!(doc.children()[1], Node::Comment(_)));
        assert!(matches!(doc.children()[2], Node::Element(_)));
        assert!(matches!(doc.children()[3], Node::ProcessingInstruction(_)));
    }

    #[test]
    fn test_dtd_with_entities() {
        let src = "<!DOCTYPE note [\n<!ENTITY writer \"Donald\">\n]>\n<note/>";
        let doc = Document::parse(src).unwrap();
        assert_eq!(doc.root().unwrap().name(), "note");
    }

    #[test]
    fn test_cdata_child() {
        let doc = Document::parse("<a><![CDATA[ <raw> ]]></a>").unwrap();
        match &doc.root().unwrap().children()[0] {
            Node::Cdata(cdata) => assert_eq!(cdata.content().as_str(), " <raw> "),
            other => panic!("expected cdata, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_tag() {
        let err = Document::parse("<a><b></a>").unwrap_err();
        match err.kind {
            XmlErrorKind::MismatchedTag { expected, found } => {
                assert_eq!(expected, "b");
                assert_eq!(found, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.context.position(), (1, 7));
    }

    #[test]
    fn test_unclosed_tag() {
        let err = Document::parse("<a><b>").unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::UnclosedTag(ref name) if name == "b"));
    }

    #[test]
    fn test_empty_input() {
        let err = Document::parse("   ").unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_not_xml() {
        assert!(Document::parse("{\"a\": 1}").is_err());
        assert!(Document::parse("plain text").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("{}{}", "<a>".repeat(n), "</a>".repeat(n));

        let src = nested(MAX_DEPTH);
        let doc = Document::parse(&src).unwrap();
        assert_eq!(doc.root().unwrap().name(), "a");

        let err = Document::parse(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::TooDeep(MAX_DEPTH)));
        assert_eq!(err.context.position(), (1, MAX_DEPTH * 3 + 1));

        let err = Document::parse(&nested(10_000)).unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::TooDeep(_)));
    }

    #[test]
    fn test_error_at_first_byte_has_position() {
        let err = Document::parse("</a>").unwrap_err();
        assert!(err.context.start.is_some());
        assert!(err.to_string().contains("= At 1:"));
    }

    #[test]
    fn test_offset_of() {
        let src = "ab\ncd";
        assert_eq!(offset_of(src, xmlparser::TextPos::new(2, 2)), 4);
        assert_eq!(offset_of(src, xmlparser::TextPos::new(9, 9)), 5);
    }
}
