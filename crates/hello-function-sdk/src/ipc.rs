//! IPC protocol for running a handler as a worker process.
//!
//! The host and the worker exchange length-prefixed JSON frames: a 4-byte
//! big-endian payload length followed by the payload. The host writes a
//! [`Request`] frame to the worker's stdin and reads one [`Response`] frame
//! back from its stdout. Logging must therefore never go to stdout.
//!
//! ```ignore
//! use hello_function_sdk::prelude::*;
//!
//! fn handle(req: &Request) -> Response {
//!     Response::text(200, req.path.clone())
//! }
//!
//! fn main() -> Result<(), HandlerError> {
//!     let stdin = std::io::stdin();
//!     let stdout = std::io::stdout();
//!     ipc::serve(&handle, stdin.lock(), stdout.lock())?;
//!     Ok(())
//! }
//! ```

use crate::{Handler, HandlerError, Request, Response};
use bytes::{BufMut, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, ErrorKind, Read, Write};

/// Largest payload accepted in a single frame (16 MiB).
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Read one request frame. `Ok(None)` means the host closed the stream
/// between frames.
pub fn read_request_from<R: Read>(reader: &mut R) -> Result<Option<Request>, HandlerError> {
    read_frame(reader)
}

/// Write one response frame and flush it.
pub fn write_response_to<W: Write>(writer: &mut W, response: &Response) -> Result<(), HandlerError> {
    write_frame(writer, response)
}

/// Host side: write one request frame to a worker.
pub fn write_request_to<W: Write>(writer: &mut W, request: &Request) -> Result<(), HandlerError> {
    write_frame(writer, request)
}

/// Host side: read the worker's response frame.
pub fn read_response_from<R: Read>(reader: &mut R) -> Result<Option<Response>, HandlerError> {
    read_frame(reader)
}

/// Read a request from stdin (sent by the host)
pub fn read_request() -> Result<Option<Request>, HandlerError> {
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    read_request_from(&mut handle)
}

/// Send a response to stdout (received by the host)
pub fn send_response(response: &Response) -> Result<(), HandlerError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_response_to(&mut handle, response)
}

/// Answer request frames until the host closes the stream.
///
/// Returns the number of requests served. A malformed frame ends the loop
/// with an error, since the stream position can no longer be trusted.
pub fn serve<H, R, W>(handler: &H, mut reader: R, mut writer: W) -> Result<u64, HandlerError>
where
    H: Handler + ?Sized,
    R: Read,
    W: Write,
{
    let mut served = 0;
    while let Some(req) = read_request_from(&mut reader)? {
        let response = handler.invoke(&req);
        write_response_to(&mut writer, &response)?;
        served += 1;
    }
    tracing::debug!(served, "IPC stream closed");
    Ok(served)
}

fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>, HandlerError> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(HandlerError::Ipc("Truncated length prefix".into())),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(HandlerError::Ipc(format!(
            "Frame of {} bytes exceeds limit of {} bytes",
            len, MAX_FRAME_LEN
        )));
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(|e| HandlerError::Ipc(format!("Failed to read payload: {}", e)))?;

    serde_json::from_slice(&payload)
        .map(Some)
        .map_err(|e| HandlerError::Ipc(format!("Failed to parse frame: {}", e)))
}

fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), HandlerError> {
    let payload = serde_json::to_vec(value)?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(HandlerError::Ipc(format!(
            "Frame of {} bytes exceeds limit of {} bytes",
            payload.len(),
            MAX_FRAME_LEN
        )));
    }

    let mut frame = BytesMut::with_capacity(4 + payload.len());
    frame.put_u32(payload.len() as u32);
    frame.put_slice(&payload);

    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}
