//! Hello Function - an HTTP-triggered hello world function
//!
//! [`handler::handle`] is the function itself. [`host`] serves it over HTTP
//! the way a function-hosting platform would, and the SDK's IPC loop runs it
//! as a worker process.

pub mod config;
pub mod handler;
pub mod host;
pub mod telemetry;

pub use config::{FunctionConfig, RunMode};
pub use handler::handle;
