//! RPC error types.

use serde_json::Value;
use thiserror::Error;

/// JSON-RPC 2.0 standard error codes.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Everything a wallet RPC call can resolve to besides a result.
///
/// Expected failures never panic and never escape as anything but one of
/// these variants, so call sites discriminate success from failure on a
/// single `Result` shape without inspecting HTTP status themselves.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Error reported by the wallet daemon. `raw` carries the daemon's
    /// error object verbatim.
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        raw: Value,
    },

    /// Connection, DNS, TLS, or timeout failure. The underlying cause is
    /// logged, not carried.
    #[error("{message}")]
    Transport { message: String },

    /// Response body was not valid JSON. The raw body is retained for
    /// diagnostics.
    #[error("malformed RPC response: {message}")]
    Parse { message: String, body: String },

    /// Parseable body with neither `result` nor `error`.
    #[error("unexpected response from RPC wallet (HTTP {status})")]
    Unexpected { status: u16, body: String },

    /// HTTP 401 with no usable credentials, or one that survived the
    /// Digest handshake.
    #[error("authentication failed")]
    Unauthorized,

    /// A `result` payload that does not match the expected shape.
    #[error("unexpected result shape: {0}")]
    Decode(#[from] serde_json::Error),
}
