//! HTTP Request representation for handlers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an incoming HTTP request, as built by the host for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method exactly as received (GET, POST, ...). Never normalised.
    pub method: String,

    /// Request path (e.g., "/items/123")
    pub path: String,

    /// Client network address, without the port
    #[serde(default)]
    pub remote_addr: String,

    /// Query parameters
    #[serde(default)]
    pub query: HashMap<String, String>,

    /// HTTP headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Raw request body, lossily decoded as UTF-8
    #[serde(default)]
    pub body: Option<String>,

    /// Request ID for tracing
    #[serde(default)]
    pub request_id: String,
}

impl Request {
    /// Build a request from the three fields every host must supply.
    ///
    /// # Example
    /// ```
    /// use hello_function_sdk::Request;
    ///
    /// let req = Request::new("POST", "/", "10.0.0.5");
    /// assert_eq!(req.method, "POST");
    /// assert!(req.headers.is_empty());
    /// ```
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        remote_addr: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            remote_addr: remote_addr.into(),
            ..Self::default()
        }
    }

    /// Get a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&String> {
        self.query.get(key)
    }

    /// Get a header value (case-insensitive lookup).
    ///
    /// # Example
    /// ```ignore
    /// let agent = req.header("User-Agent"); // Works with any case
    /// ```
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            remote_addr: String::new(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: None,
            request_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_get_root() {
        let req = Request::default();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/");
        assert!(req.remote_addr.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut req = Request::new("GET", "/", "127.0.0.1");
        req.headers.insert("content-type".into(), "text/plain".into());

        assert_eq!(req.header("Content-Type").map(String::as_str), Some("text/plain"));
        assert!(req.header("Accept").is_none());
    }

    #[test]
    fn test_query_param() {
        let mut req = Request::default();
        req.query.insert("name".into(), "world".into());

        assert_eq!(req.query_param("name").map(String::as_str), Some("world"));
        assert!(req.query_param("missing").is_none());
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let req: Request = serde_json::from_str(r#"{"method":"HEAD","path":"/x"}"#).unwrap();
        assert_eq!(req.method, "HEAD");
        assert_eq!(req.path, "/x");
        assert!(req.remote_addr.is_empty());
        assert!(req.query.is_empty());
        assert!(req.request_id.is_empty());
    }

    #[test]
    fn test_deserialize_requires_method() {
        assert!(serde_json::from_str::<Request>(r#"{"path":"/"}"#).is_err());
    }
}
