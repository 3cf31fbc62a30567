//! Pretty-printing for logged HTTP bodies.
//!
//! Built for the admin view of a request log, where an operator flips a stored body between
//! the text as it was logged and an indented rendering of it:
//! - XML is parsed into a tree of [`Node`]s and re-indented with two spaces per level
//! - JSON is re-serialized with three spaces per level
//! - Bodies that fail to parse are shown as [`INVALID_XML`] / [`INVALID_JSON`]
//!
//! ```rust
//! use bodyfmt::{BodyFormat, prettify};
//!
//! let body = r#"<root><child attr="1">text</child></root>"#;
//! let pretty = prettify(body, BodyFormat::detect(Some("text/xml"), body));
//! assert_eq!(pretty, "<root>\n  <child attr=\"1\">text</child>\n</root>");
//! ```
//!
//! For the parse error itself, with its position in the source, use [`format_xml`] or
//! [`Document::parse`].
#![warn(missing_docs)]

mod strspan;
pub use strspan::StrSpan;

pub mod error;
pub use error::{XmlError, XmlErrorKind, XmlResult};

pub mod node;
pub use node::{CdataNode, ElementNode, Node, NodeAttribute, NodeName, TextNode};

mod document;
pub use document::{Document, MAX_DEPTH};

pub mod pretty;
pub use pretty::INDENT;

pub mod json;

mod content_type;
pub use content_type::{BodyFormat, ContentType, DEFAULT_ENCODINGS, default_encoding};

mod fallback;
pub use fallback::{
    INVALID_JSON, INVALID_XML, format_xml, prettify, prettify_json, prettify_xml, prettify_xml_at,
};

pub mod toggle;
pub use toggle::{BodyView, ResponseBody, ToggleError, ToggleRequest, ToggleResponse};
