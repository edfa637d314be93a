//! Wire protocol for host↔engine calls.
//!
//! Every call is one JSON request envelope `{"method", "args"}` answered by
//! one JSON response envelope `{"success", "data", "error_message"}`. The
//! envelope is shape-agnostic, so every operation shares one encode path and
//! one decode path regardless of its result type.

mod codec;
mod message;

pub use codec::{CodecError, decode, encode, ensure_within};
pub use message::{DEFAULT_FAILURE_MESSAGE, MAX_RESPONSE_LEN, Request, Response};
