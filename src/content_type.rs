//! Choosing a formatter for a logged body.
//!
//! Logged bodies carry the `Content-Type` of the request or response they came from.
//! When the header is missing or unhelpful, the body itself is sniffed.
//!
//! The header also decides how raw body bytes are decoded: its `charset` when it names one,
//! otherwise the default for the media type from [`DEFAULT_ENCODINGS`].
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use tracing::debug;

/// Charset assumed for a media type logged without one.
///
/// Patterns ending in `*` match by prefix and are only tried when no exact pattern matches.
pub const DEFAULT_ENCODINGS: &[(&str, &str)] = &[
    ("application/json", "utf-8"),
    ("application/soap+xml", "utf-8"),
    ("application/xml", "utf-8"),
    ("text/xml", "iso-8859-1"),
    ("text/*", "utf-8"),
];

/// Look up the default charset label for a media type.
///
/// # Example
/// ```rust
/// use bodyfmt::default_encoding;
/// assert_eq!(default_encoding("text/xml"), Some("iso-8859-1"));
/// assert_eq!(default_encoding("text/html"), Some("utf-8"));
/// assert_eq!(default_encoding("application/unknown"), None);
/// ```
#[must_use]
pub fn default_encoding(media_type: &str) -> Option<&'static str> {
    let (wildcards, exact): (Vec<_>, Vec<_>) = DEFAULT_ENCODINGS
        .iter()
        .partition(|(pattern, _)| pattern.ends_with('*'));

    exact
        .into_iter()
        .find(|(pattern, _)| *pattern == media_type)
        .or_else(|| {
            wildcards
                .into_iter()
                .find(|(pattern, _)| media_type.starts_with(pattern.trim_end_matches('*')))
        })
        .map(|(_, label)| label)
}

/// A parsed `Content-Type` header value:
/// `application/xml; charset=utf-8`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentType {
    /// The lowercased media type, without parameters.
    pub media_type: String,

    /// The `charset` parameter, if one was given.
    pub charset: Option<String>,
}
impl ContentType {
    /// Parse a header value. Unknown parameters are ignored.
    ///
    /// # Example
    /// ```rust
    /// use bodyfmt::ContentType;
    /// let ct = ContentType::parse("Text/XML; Charset=\"ISO-8859-1\"");
    /// assert_eq!(ct.media_type, "text/xml");
    /// assert_eq!(ct.charset.as_deref(), Some("ISO-8859-1"));
    /// ```
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut parts = header.split(';');
        let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();

        let charset = parts.find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"').to_string())
        });

        Self {
            media_type,
            charset,
        }
    }

    /// The encoding of a body logged with this content type.
    ///
    /// An unrecognized `charset` is ignored in favor of the media type's default;
    /// UTF-8 is used when neither applies.
    #[must_use]
    pub fn encoding(&self) -> &'static Encoding {
        let from_label = |label: &str| Encoding::for_label(label.trim().as_bytes());

        if let Some(charset) = &self.charset {
            match from_label(charset.as_str()) {
                Some(encoding) => return encoding,
                None => debug!(%charset, "unknown charset, using the default"),
            }
        }

        default_encoding(&self.media_type)
            .and_then(from_label)
            .unwrap_or(UTF_8)
    }

    /// Decode raw body bytes to text. A byte order mark overrides the declared encoding
    /// and is removed; malformed sequences become U+FFFD.
    ///
    /// # Example
    /// ```rust
    /// use bodyfmt::ContentType;
    /// let ct = ContentType::parse("text/xml; charset=iso-8859-1");
    /// assert_eq!(ct.decode(b"<a>caf\xe9</a>"), "<a>caf\u{e9}</a>");
    /// ```
    #[must_use]
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, encoding, had_errors) = self.encoding().decode(bytes);
        if had_errors {
            debug!(encoding = encoding.name(), "body contains malformed byte sequences");
        }
        text
    }

    /// The formatter implied by the media type.
    #[must_use]
    pub fn body_format(&self) -> BodyFormat {
        let media_type = self.media_type.as_str();
        match media_type {
            "application/json" | "text/json" => BodyFormat::Json,
            "application/xml" | "text/xml" => BodyFormat::Xml,
            _ if media_type.ends_with("+json") => BodyFormat::Json,
            _ if media_type.ends_with("+xml") => BodyFormat::Xml,
            _ => BodyFormat::Plain,
        }
    }
}

/// How a body should be pretty-printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    /// Re-indented with three spaces per level
    Json,

    /// Re-indented with two spaces per level
    Xml,

    /// Left as-is
    #[default]
    Plain,
}
impl BodyFormat {
    /// Pick a format from a `Content-Type` header value.
    #[must_use]
    pub fn from_content_type(header: &str) -> Self {
        ContentType::parse(header).body_format()
    }

    /// Guess a format from the first non-whitespace character of the body,
    /// skipping a leading byte order mark.
    #[must_use]
    pub fn sniff(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        match text.trim_start().chars().next() {
            Some('{' | '[') => Self::Json,
            Some('<') => Self::Xml,
            _ => Self::Plain,
        }
    }

    /// Use the header when it names a known format, otherwise sniff the body.
    #[must_use]
    pub fn detect(content_type: Option<&str>, text: &str) -> Self {
        match content_type.map(Self::from_content_type) {
            Some(format @ (Self::Json | Self::Xml)) => format,
            _ => Self::sniff(text),
        }
    }
}
impl std::str::FromStr for BodyFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(format!("unknown body format: {other}")),
        }
    }
}
impl std::fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Plain => "plain",
        };
        f.write_str(name)
    }
}
