//! Hello Function SDK - Types shared by a function handler and its host
//!
//! This crate provides the request and response types a handler sees, the
//! [`Handler`] trait hosts call through, and the worker IPC protocol.

pub mod error;
pub mod handler;
pub mod ipc;
pub mod request;
pub mod response;

pub mod prelude {
    //! Common imports for handlers
    pub use crate::error::HandlerError;
    pub use crate::handler::Handler;
    pub use crate::ipc;
    pub use crate::request::Request;
    pub use crate::response::Response;
}

// Re-export key types at crate root
pub use error::HandlerError;
pub use handler::Handler;
pub use request::Request;
pub use response::Response;
