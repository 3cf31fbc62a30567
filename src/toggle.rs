//! The admin panel's body toggle.
//!
//! The page shows a logged body with two links, "prettify" and "original". Clicking one posts
//! a [`ToggleRequest`] to the matching endpoint with the `X-CSRFToken` header set, and
//! replaces the displayed text with the `newValue` of the [`ToggleResponse`].
use crate::{BodyFormat, ContentType, prettify};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Header carrying the anti-forgery token on toggle requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// A toggle request that could not be served.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// The anti-forgery header was missing or did not carry the session's token
    #[error("Missing or invalid {CSRF_HEADER} header")]
    Forbidden,

    /// The path is not one of the toggle endpoints
    #[error("No toggle endpoint at {0}")]
    NotFound(String),

    /// The request body was not a toggle request
    #[error("Malformed toggle request: {0}")]
    BadRequest(#[from] serde_json::Error),
}

/// Body of a toggle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRequest {
    /// Address of the admin page the request came from.
    pub url: String,

    /// The body text to transform.
    pub text: String,
}

/// Body of a toggle response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Text to display in place of the current body.
    pub new_value: String,
}

/// Which rendering of a body is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyView {
    /// The body as it was logged
    #[default]
    Original,

    /// The body after pretty-printing
    Pretty,
}
impl BodyView {
    /// Path of the endpoint that switches to this view, relative to the admin mount point.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Original => "original/",
            Self::Pretty => "prettify/",
        }
    }

    /// The other view.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Original => Self::Pretty,
            Self::Pretty => Self::Original,
        }
    }

    /// Look up the view served by an endpoint path.
    #[must_use]
    pub fn from_endpoint(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "original" => Some(Self::Original),
            "prettify" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Serve a toggle request for the given view.
///
/// `content_type` is the logged `Content-Type` of the body, when known.
#[must_use]
pub fn respond(
    view: BodyView,
    request: &ToggleRequest,
    content_type: Option<&str>,
) -> ToggleResponse {
    debug!(url = %request.url, ?view, "toggling body view");

    let new_value = match view {
        BodyView::Original => request.text.clone(),
        BodyView::Pretty => {
            let format = BodyFormat::detect(content_type, &request.text);
            prettify(&request.text, format)
        }
    };

    ToggleResponse { new_value }
}

/// Serve a posted toggle request end to end.
///
/// `path` selects the view (see [`BodyView::from_endpoint`]), `headers` are the request
/// headers, and `csrf_token` is the token issued to the session. Header names are matched
/// case-insensitively. Returns the JSON-encoded [`ToggleResponse`].
///
/// # Errors
/// - [`ToggleError::Forbidden`] if the [`CSRF_HEADER`] is absent or does not match `csrf_token`
/// - [`ToggleError::NotFound`] if `path` is not a toggle endpoint
/// - [`ToggleError::BadRequest`] if `body` is not a JSON [`ToggleRequest`]
pub fn handle(
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
    csrf_token: &str,
    content_type: Option<&str>,
) -> Result<String, ToggleError> {
    let token = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CSRF_HEADER))
        .map(|(_, value)| value.trim());
    if csrf_token.is_empty() || token != Some(csrf_token) {
        warn!(path, "rejected toggle request without a valid token");
        return Err(ToggleError::Forbidden);
    }

    let view = BodyView::from_endpoint(path).ok_or_else(|| ToggleError::NotFound(path.into()))?;
    let request: ToggleRequest = serde_json::from_str(body)?;
    let response = respond(view, &request, content_type);
    Ok(serde_json::to_string(&response)?)
}

/// A logged body as shown on the admin page.
///
/// The original text is never modified; the pretty form is computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody {
    original: String,
    format: BodyFormat,
    view: BodyView,
}
impl ResponseBody {
    /// Wrap a logged body, picking its format from `content_type` or the text itself.
    #[must_use]
    pub fn new(original: impl Into<String>, content_type: Option<&str>) -> Self {
        let original = original.into();
        let format = BodyFormat::detect(content_type, &original);
        Self {
            original,
            format,
            view: BodyView::Original,
        }
    }

    /// Wrap a logged body stored as raw bytes, decoding it with the charset of
    /// `content_type` (see [`ContentType::decode`]).
    #[must_use]
    pub fn from_bytes(bytes: &[u8], content_type: Option<&str>) -> Self {
        let text = ContentType::parse(content_type.unwrap_or_default()).decode(bytes);
        Self::new(text, content_type)
    }

    /// The logged text.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The detected format.
    #[must_use]
    pub fn format(&self) -> BodyFormat {
        self.format
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> BodyView {
        self.view
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: BodyView) {
        self.view = view;
    }

    /// The text for the current view.
    #[must_use]
    pub fn displayed(&self) -> String {
        match self.view {
            BodyView::Original => self.original.clone(),
            BodyView::Pretty => prettify(&self.original, self.format),
        }
    }

    /// Flip to the other view and return the text now displayed.
    pub fn toggle(&mut self) -> String {
        self.view = self.view.flipped();
        self.displayed()
    }
}
