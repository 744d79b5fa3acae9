//! The handler seam between a function and whatever hosts it.
//!
//! A host (the HTTP runtime, or the IPC worker loop) only ever sees a
//! [`Handler`]. Plain functions qualify as long as their return value converts
//! into a [`Response`]:
//!
//! ```
//! use hello_function_sdk::{Handler, Request};
//!
//! fn greet(req: &Request) -> (String, u16) {
//!     (format!("hi from {}", req.path), 200)
//! }
//!
//! let response = greet.invoke(&Request::default());
//! assert_eq!(response.body_text(), "hi from /");
//! ```

use crate::{Request, Response};

/// Something that maps one request to exactly one response.
pub trait Handler: Send + Sync + 'static {
    fn invoke(&self, req: &Request) -> Response;
}

impl<F, R> Handler for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: Into<Response>,
{
    fn invoke(&self, req: &Request) -> Response {
        self(req).into()
    }
}
