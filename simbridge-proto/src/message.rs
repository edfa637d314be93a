//! Request and response envelope types.

use serde::Serialize;

/// Default cap on a single response payload (16 MiB).
pub const MAX_RESPONSE_LEN: usize = 16 * 1024 * 1024;

/// Message used when the engine reports failure without a reason.
pub const DEFAULT_FAILURE_MESSAGE: &str = "operation failed";

/// Request sent from host to engine.
///
/// `args` is borrowed so callers never have to clone their arguments to
/// encode them. Absent arguments are `()`, which encodes as JSON `null`.
#[derive(Debug, Serialize)]
pub struct Request<'a, A: ?Sized> {
    /// Operation identifier, e.g. `getLatestCheckpoint`.
    pub method: &'a str,
    /// Operation arguments.
    pub args: &'a A,
}

/// Response returned from engine to host.
///
/// Exactly one side is meaningful: `data` when `success` is true,
/// `error_message` otherwise. Values produced by [`decode`](crate::decode)
/// always hold this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Response<T> {
    /// Whether the engine handled the request.
    pub success: bool,
    /// Operation result, present iff `success`.
    pub data: Option<T>,
    /// Human-readable failure reason, only meaningful if `!success`.
    pub error_message: Option<String>,
}

impl<T> Response<T> {
    /// A successful response carrying `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    /// A failed response carrying `message`.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
        }
    }

    /// Splits the envelope into the result or the engine's failure reason.
    ///
    /// A missing or empty reason becomes [`DEFAULT_FAILURE_MESSAGE`].
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self
                .error_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_yields_data() {
        assert_eq!(Response::ok(7u32).into_result(), Ok(7));
    }

    #[test]
    fn failure_reason_passes_through_verbatim() {
        let resp: Response<()> = Response::err("unknown op");
        assert_eq!(resp.into_result().unwrap_err(), "unknown op");
    }

    #[test]
    fn empty_or_missing_reason_uses_default() {
        let empty: Response<()> = Response::err("");
        assert_eq!(empty.into_result().unwrap_err(), DEFAULT_FAILURE_MESSAGE);

        let missing: Response<()> = Response {
            success: false,
            data: None,
            error_message: None,
        };
        assert_eq!(missing.into_result().unwrap_err(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn request_serializes_null_args() {
        let json = serde_json::to_string(&Request {
            method: "ping",
            args: &(),
        })
        .unwrap();
        assert_eq!(json, r#"{"method":"ping","args":null}"#);
    }
}
