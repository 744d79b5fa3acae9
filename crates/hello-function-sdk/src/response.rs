//! HTTP Response representation for handlers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content type used for bare string bodies.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content type used by [`Response::text`].
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Represents an outgoing HTTP response.
///
/// Handlers may return a `Response` directly, or anything that converts into
/// one:
///
/// | Handler returns | Status | Content-Type |
/// |-----------------|--------|--------------|
/// | `&str` / `String` | 200 | `text/html; charset=utf-8` |
/// | `(body, status)` | `status` | `text/html; charset=utf-8` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<String>,
}

impl Response {
    /// Create a new response with the given status code (no body).
    ///
    /// # Example
    /// ```ignore
    /// Response::new(204) // 204 No Content
    /// ```
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a plain text response.
    ///
    /// # Example
    /// ```ignore
    /// Response::text(500, "Internal Server Error")
    /// ```
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", TEXT_CONTENT_TYPE)
            .with_body(body)
    }

    /// Create an HTML response.
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", HTML_CONTENT_TYPE)
            .with_body(body)
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Body as a string slice, empty when there is none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

impl From<&str> for Response {
    fn from(body: &str) -> Self {
        Self::html(200, body)
    }
}

impl From<String> for Response {
    fn from(body: String) -> Self {
        Self::html(200, body)
    }
}

impl<S: Into<String>> From<(S, u16)> for Response {
    fn from((body, status): (S, u16)) -> Self {
        Self::html(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string_means_ok() {
        let response = Response::from("Hello");
        assert_eq!(response.status, 200);
        assert_eq!(response.body_text(), "Hello");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some(HTML_CONTENT_TYPE)
        );
    }

    #[test]
    fn test_body_status_pair() {
        let response: Response = ("Gone", 410).into();
        assert_eq!(response.status, 410);
        assert_eq!(response.body_text(), "Gone");
    }

    #[test]
    fn test_text_sets_plain_content_type() {
        let response = Response::text(500, "boom");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some(TEXT_CONTENT_TYPE)
        );
    }

    #[test]
    fn test_new_has_no_body() {
        let response = Response::new(204);
        assert!(response.body.is_none());
        assert_eq!(response.body_text(), "");
    }
}
