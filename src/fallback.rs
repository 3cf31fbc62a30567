//! Infallible pretty-printing for display.
//!
//! These never return an error: a body that does not parse is replaced with a fixed marker,
//! so callers can put the result straight on screen.
use crate::{BodyFormat, Document, XmlResult, json::try_prettify_json};
use tracing::{debug, instrument};

/// Shown in place of an XML body that is not well-formed.
pub const INVALID_XML: &str = "Invalid XML format";

/// Shown in place of a JSON body that does not parse.
pub const INVALID_JSON: &str = "Invalid JSON format";

/// Parse and re-indent an XML document, starting at `depth`.
///
/// # Errors
/// Returns the parse error if `text` is not well-formed XML.
pub fn format_xml(text: &str, depth: usize) -> XmlResult<String> {
    let document = Document::parse(text)?;
    Ok(document.to_pretty_xml(depth))
}

/// Re-indent an XML body, or return [`INVALID_XML`].
///
/// # Example
/// ```rust
/// assert_eq!(bodyfmt::prettify_xml("<a><b/></a>"), "<a>\n  <b/>\n</a>");
/// assert_eq!(bodyfmt::prettify_xml("<a><b></a>"), bodyfmt::INVALID_XML);
/// ```
#[must_use]
pub fn prettify_xml(text: &str) -> String {
    prettify_xml_at(text, 0)
}

/// Re-indent an XML body starting at `depth`, or return [`INVALID_XML`].
///
/// The marker is never indented.
#[instrument(level = "debug", skip_all, fields(len = text.len(), depth))]
#[must_use]
pub fn prettify_xml_at(text: &str, depth: usize) -> String {
    match format_xml(text, depth) {
        Ok(pretty) => pretty,
        Err(e) => {
            debug!(error = %e.kind, "body is not well-formed xml");
            INVALID_XML.to_string()
        }
    }
}

/// Re-indent a JSON body, or return [`INVALID_JSON`].
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
#[must_use]
pub fn prettify_json(text: &str) -> String {
    match try_prettify_json(text) {
        Ok(pretty) => pretty,
        Err(e) => {
            debug!(error = %e, "body is not valid json");
            INVALID_JSON.to_string()
        }
    }
}

/// Pretty-print a body in the given format. Plain bodies are returned unchanged.
#[must_use]
pub fn prettify(text: &str, format: BodyFormat) -> String {
    match format {
        BodyFormat::Json => prettify_json(text),
        BodyFormat::Xml => prettify_xml(text),
        BodyFormat::Plain => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_xml_gives_marker() {
        assert_eq!(prettify_xml("<a><b></a>"), INVALID_XML);
        assert_eq!(prettify_xml(""), INVALID_XML);
        assert_eq!(prettify_xml("{\"a\": 1}"), INVALID_XML);
    }

    #[test]
    fn test_malformed_json_gives_marker() {
        assert_eq!(prettify_json("{\"a\": }"), INVALID_JSON);
        assert_eq!(prettify_json(""), INVALID_JSON);
    }

    #[test]
    fn test_indented_fallback() {
        assert_eq!(prettify_xml_at("<a><b/></a>", 1), "  <a>\n    <b/>\n  </a>");
        assert_eq!(prettify_xml_at("<a>", 2), INVALID_XML);
    }

    #[test]
    fn test_deep_nesting_gives_marker() {
        let depth = crate::MAX_DEPTH * 4;
        let text = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        assert_eq!(prettify_xml(&text), INVALID_XML);

        let text = "<a>".repeat(100_000);
        assert_eq!(prettify_xml(&text), INVALID_XML);
    }

    #[test]
    fn test_format_xml_error_is_kept() {
        assert!(format_xml("<a>", 0).is_err());
        assert_eq!(format_xml("<a>x</a>", 1).unwrap(), "  <a>x</a>");
    }

    #[test]
    fn test_prettify_dispatch() {
        assert_eq!(prettify("[1]", BodyFormat::Json), "[\n   1\n]");
        assert_eq!(prettify("<a></a>", BodyFormat::Xml), "<a/>");
        assert_eq!(prettify(" raw ", BodyFormat::Plain), " raw ");
    }
}
