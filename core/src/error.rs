//! Error types for the follower API client.
//!
//! # Design
//! The aggregation pipeline never retries, so variants exist for reporting,
//! not for recovery. `NotFound`, `Unauthorized` and `RateLimited` get
//! dedicated variants because they are the failures a user can act on; every
//! other non-2xx response lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by the client, the transports and the aggregation service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained (connect, DNS, TLS, timeout, body read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 401. The token is missing, expired or revoked.
    #[error("unauthorized: check the access token")]
    Unauthorized,

    /// The server returned 404. The user does not exist.
    #[error("user not found")]
    NotFound,

    /// The primary or secondary rate limit was hit.
    #[error("rate limited{}", reset_suffix(.reset))]
    RateLimited { reset: Option<u64> },

    /// Any other non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into account records.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The upstream kept reporting more pages past the configured cap.
    #[error("page limit of {limit} exceeded")]
    PageLimitExceeded { limit: u32 },

    /// The configured API base URL cannot carry path segments.
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),

    /// The caller asked to stop before the next page request.
    #[error("cancelled")]
    Cancelled,
}

fn reset_suffix(reset: &Option<u64>) -> String {
    match reset {
        Some(epoch) => format!(" until epoch {epoch}"),
        None => String::new(),
    }
}
