//! Error handling for XML parsing
use super::StrSpan;
use std::path::PathBuf;

/// A result type for XML parsing, which can be either a successful value or an error.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// An error that occurred while parsing a document.
#[derive(Debug)]
pub struct XmlError {
    /// The context of the error
    pub context: Box<ErrorContext>,

    /// The kind of error that occurred while parsing a document
    pub kind: XmlErrorKind,
}
impl XmlError {
    /// Creates a new `XmlError`
    #[must_use]
    pub fn new(kind: XmlErrorKind, context: ErrorContext) -> Self {
        Self {
            context: Box::new(context),
            kind,
        }
    }

    /// Adds a path to the error context.
    #[must_use]
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.context.path = Some(path);
        self
    }
}
impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.context)?;

        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        Self::new(XmlErrorKind::Io(err), ErrorContext::unlocated())
    }
}

/// The kind of error that occurred while parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum XmlErrorKind {
    /// Another error occurred while parsing the document
    #[error("{0}")]
    Custom(String),

    /// A tag in the document was never closed
    #[error("Unclosed tag: {0}")]
    UnclosedTag(String),

    /// A closing tag did not match the innermost open tag
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Name of the innermost open tag
        expected: String,

        /// Name used by the closing tag
        found: String,
    },

    /// Elements were nested deeper than the parser accepts
    #[error("Elements nested deeper than {0} levels")]
    TooDeep(usize),

    /// File ended unexpectedly
    #[error("End of file reached unexpectedly")]
    UnexpectedEof,

    /// XML tokenization failed
    #[error("XML parser error: {0}")]
    Xml(#[from] xmlparser::Error),

    /// IO error occurred while reading the body
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Context describing the error location in the source text.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The path to the file that was parsed, if available.
    pub path: Option<PathBuf>,

    /// Full source text that was parsed, for row/col calculation.
    pub source: String,

    /// Text of the offending token.
    pub snippet: String,

    /// Byte offset of the error in the source text, if it has one.
    pub start: Option<usize>,
}
impl ErrorContext {
    /// Creates a new `ErrorContext` with the given source, and span.
    #[must_use]
    pub fn new(source: &str, span: StrSpan<'_>) -> Self {
        Self {
            path: None,
            source: source.to_string(),
            snippet: span.as_str().to_string(),
            start: Some(span.start()),
        }
    }

    /// Creates an `ErrorContext` for errors that have no location in a source text.
    #[must_use]
    pub fn unlocated() -> Self {
        Self {
            path: None,
            source: String::new(),
            snippet: String::new(),
            start: None,
        }
    }

    /// Returns the row and column of the error in the source text.
    /// Unlocated errors report `(1, 1)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        StrSpan::position_in_text(self.start.unwrap_or_default(), &self.source)
    }
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_ref().map(|p| p.display());
        let line = self.snippet.split('\n').next().unwrap_or(&self.snippet);

        if !line.is_empty() {
            writeln!(f, "| {line}")?;
        }

        if self.start.is_some() {
            let (row, col) = self.position();
            write!(f, "= At ")?;

            if let Some(path) = path {
                write!(f, "{path}:")?;
            }

            writeln!(f, "{row}:{col}")?;
        } else if let Some(path) = path {
            writeln!(f, "= In {path}")?;
        }
        Ok(())
    }
}

/// Return early with an `XmlError` located at a span of the source.
macro_rules! bail {
    ($src:expr, $kind:expr) => {
        return Err($crate::error::XmlError::new(
            $kind,
            $crate::error::ErrorContext::new($src, $crate::StrSpan::end($src)),
        ))
    };

    ($src:expr, $span:expr, msg = $($fmt:tt)+) => {
        return Err($crate::error::XmlError::new(
            $crate::error::XmlErrorKind::Custom(format!($($fmt)+)),
            $crate::error::ErrorContext::new($src, $span),
        ))
    };

    ($src:expr, $span:expr, $kind:expr) => {
        return Err($crate::error::XmlError::new(
            $kind,
            $crate::error::ErrorContext::new($src, $span),
        ))
    };
}
pub(crate) use bail;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let src = "<a>\n<b></c>";
        let err = XmlError::new(
            XmlErrorKind::MismatchedTag {
                expected: "b".to_string(),
                found: "c".to_string(),
            },
            ErrorContext::new(src, StrSpan::new("</c>", 7)),
        );

        let text = err.to_string();
        assert_eq!(
            text,
            "| </c>\n= At 2:4\n= Mismatched closing tag: expected </b>, found </c>\n"
        );
    }

    #[test]
    fn test_display_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = XmlError::from(io).with_path(PathBuf::from("body.xml"));

        assert_eq!(err.to_string(), "= In body.xml\n= IO error: no such file\n");
    }

    #[test]
    fn test_display_at_first_byte() {
        let err = XmlError::new(
            XmlErrorKind::UnexpectedEof,
            ErrorContext::new("</a>", StrSpan::new("</a>", 0)),
        );

        assert_eq!(
            err.to_string(),
            "| </a>\n= At 1:1\n= End of file reached unexpectedly\n"
        );
    }

    #[test]
    fn test_display_at_end_of_multibyte_text() {
        let src = "<a>caf\u{e9}";
        let err = XmlError::new(
            XmlErrorKind::UnexpectedEof,
            ErrorContext::new(src, StrSpan::end(src)),
        );

        assert_eq!(
            err.to_string(),
            "= At 1:8\n= End of file reached unexpectedly\n"
        );
    }
}
