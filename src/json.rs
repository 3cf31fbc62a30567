//! JSON pretty-printing, backed by `serde_json`.
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Indentation used for JSON bodies.
pub const JSON_INDENT: &str = "   ";

/// Re-serialize a JSON document with a three-space indent.
///
/// Object keys keep their source order.
///
/// # Errors
/// Returns the parse error if `text` is not valid JSON.
///
/// # Example
/// ```rust
/// let pretty = bodyfmt::json::try_prettify_json(r#"{"b":1,"a":[true]}"#).unwrap();
/// assert_eq!(pretty, "{\n   \"b\": 1,\n   \"a\": [\n      true\n   ]\n}");
/// ```
pub fn try_prettify_json(text: &str) -> serde_json::Result<String> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let mut buffer = Vec::with_capacity(text.len());
    let formatter = PrettyFormatter::with_indent(JSON_INDENT.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
