//! Generic call dispatch: the single path every operation takes across the
//! boundary.

#![allow(unsafe_code)]

use serde::Serialize;
use serde::de::DeserializeOwned;
use simbridge_proto::{MAX_RESPONSE_LEN, Response};
use tracing::{debug, trace, warn};

use crate::boundary::Boundary;
use crate::buffer::ForeignBuffer;
use crate::error::{Error, Result};
use crate::handle::EngineHandle;

/// Per-call limits and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct CallOptions {
    /// Largest response accepted, in bytes.
    pub max_response_len: usize,
    /// Log raw request and response payloads at `trace` level.
    pub trace_payloads: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            max_response_len: MAX_RESPONSE_LEN,
            trace_payloads: false,
        }
    }
}

/// Sends `method(args)` to the engine behind `handle` and decodes the result
/// as `T`.
///
/// Steps, in order: liveness check, encode, execute, null check, size check,
/// copy, release, decode, envelope check. The response buffer is released on
/// every path that receives one.
pub fn call<B, T, A>(
    handle: &EngineHandle<B>,
    method: &str,
    args: &A,
    options: &CallOptions,
) -> Result<T>
where
    B: Boundary,
    T: DeserializeOwned,
    A: Serialize + ?Sized,
{
    let raw = handle.raw()?;
    let request = simbridge_proto::encode(method, args).map_err(Error::EncodingFailed)?;
    if options.trace_payloads {
        trace!(method, payload = %String::from_utf8_lossy(&request), "sending request");
    }

    let boundary = handle.boundary();
    // SAFETY: `raw` is live for as long as `handle` is borrowed, and the
    // returned buffer is owned by the guard from here on.
    let response = unsafe { ForeignBuffer::new(boundary, boundary.execute(raw, &request)) };
    let request_len = request.len();
    drop(request);

    if response.is_null() {
        warn!(method, length = response.len(), "engine returned a null result");
        return Err(Error::CallFailed);
    }
    // Reject a bogus length before any slice is built from it.
    simbridge_proto::ensure_within(response.len(), options.max_response_len)
        .map_err(Error::DecodingFailed)?;
    let bytes = response.bytes().map(<[u8]>::to_vec).unwrap_or_default();
    drop(response);

    debug!(method, request_len, response_len = bytes.len(), "engine call returned");
    if options.trace_payloads {
        trace!(method, payload = %String::from_utf8_lossy(&bytes), "received response");
    }

    let response: Response<T> = simbridge_proto::decode(&bytes).map_err(Error::DecodingFailed)?;
    response.into_result().map_err(|message| {
        debug!(method, %message, "engine reported failure");
        Error::OperationFailed(message)
    })
}
