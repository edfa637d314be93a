//! JSON codec for request and response envelopes.
//!
//! Decoding is two-stage: the envelope is parsed first with `data` kept as a
//! raw [`serde_json::Value`], then `data` is converted into the caller's
//! expected type only when `success` is true. A failure envelope therefore
//! never has to match the success shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::message::{Request, Response};

/// Errors produced while encoding a request or decoding a response.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The request had an empty method name.
    #[error("method name must not be empty")]
    EmptyMethod,

    /// The arguments could not be represented as JSON.
    #[error("failed to serialize request: {0}")]
    Encode(#[source] serde_json::Error),

    /// An argument does not fit the type the engine expects.
    #[error("argument `{0}` is out of range")]
    OutOfRange(&'static str),

    /// The response was malformed or `data` did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response exceeded the configured size limit.
    #[error("response of {len} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Reported response length.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Response envelope as it appears on the wire.
///
/// The engine writes `null` for whichever side is unused, and may omit
/// either field entirely.
#[derive(Deserialize)]
struct Envelope {
    /// Whether the engine handled the request.
    success: bool,
    /// Untyped result payload.
    #[serde(default)]
    data: serde_json::Value,
    /// Failure reason.
    #[serde(default)]
    error_message: Option<String>,
}

/// Encodes `method` and `args` as a request envelope.
pub fn encode<A: Serialize + ?Sized>(method: &str, args: &A) -> Result<Vec<u8>, CodecError> {
    if method.is_empty() {
        return Err(CodecError::EmptyMethod);
    }
    serde_json::to_vec(&Request { method, args }).map_err(CodecError::Encode)
}

/// Decodes a response envelope, converting `data` into `T` on success.
///
/// On success a missing or `null` `data` is decoded as JSON `null`, so
/// operations without a result can use `T = ()`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Response<T>, CodecError> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(CodecError::Decode)?;
    if !envelope.success {
        return Ok(Response {
            success: false,
            data: None,
            error_message: envelope.error_message,
        });
    }
    let data = serde_json::from_value(envelope.data).map_err(CodecError::Decode)?;
    Ok(Response::ok(data))
}

/// Rejects a response longer than `limit` bytes before it is copied.
pub const fn ensure_within(len: usize, limit: usize) -> Result<(), CodecError> {
    if len > limit {
        Err(CodecError::TooLarge { len, limit })
    } else {
        Ok(())
    }
}
