//! Error types for simbridge operations.

use simbridge_proto::CodecError;

/// Alias for `Result<T, simbridge::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by engine calls.
///
/// Every variant except [`Error::OperationFailed`] describes a local
/// condition; `OperationFailed` carries the engine's own message unchanged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The engine could not allocate or initialize a new instance.
    #[error("failed to create simulator")]
    CreationFailed,

    /// A call was made after the handle was destroyed.
    #[error("simulator has been destroyed")]
    HandleDestroyed,

    /// The request could not be encoded.
    #[error("failed to encode request")]
    EncodingFailed(#[source] CodecError),

    /// The boundary call produced no result buffer.
    #[error("boundary call returned no result")]
    CallFailed,

    /// The response was malformed, oversized, or of the wrong shape.
    #[error("failed to decode response")]
    DecodingFailed(#[source] CodecError),

    /// The engine reported failure.
    #[error("{0}")]
    OperationFailed(String),
}
