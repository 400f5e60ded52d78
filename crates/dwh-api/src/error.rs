use thiserror::Error;

use crate::analytics::types::Category;

/// Top-level error type for the `dwh-api` crate.
///
/// Covers every failure mode of a relays-total query: parameter
/// validation, client construction, transport, the classified API
/// conditions, and row decoding. Each variant is a distinct condition
/// callers can branch on; nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    // ── Validation (checked before any network call) ────────────────
    /// Neither `from` nor `to` may be unset.
    #[error("no date range provided")]
    NoDateRange,

    /// The identifier list for the given category was empty.
    #[error("no ids provided for category '{category}'")]
    NoIds { category: Category },

    // ── Construction ────────────────────────────────────────────────
    /// API key could not be used as a header value.
    #[error("Authentication setup failed: {message}")]
    Authentication { message: String },

    /// TLS configuration or client build error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout,
    /// cancelled request, etc.) — propagated unchanged from reqwest.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Classified API conditions (priority order, first match wins) ─
    /// The warehouse answered with a 204 No Content shape.
    #[error("no content (HTTP 204)")]
    NoContent,

    /// The warehouse rejected the API key.
    #[error("unauthorized access")]
    Unauthorized,

    /// The queried resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The response carried no body at all.
    #[error("empty response body")]
    EmptyBody,

    /// No HTTP response was produced for the request.
    #[error("empty http response")]
    EmptyHttpResponse,

    /// HTTP 200 whose `data` field was null.
    #[error("empty data in 200 response")]
    EmptyData,

    /// The warehouse returned its generic error shape.
    #[error("unknown error (HTTP {status}): {message}")]
    Unknown { status: u16, message: String },

    /// The response matched none of the known shapes.
    #[error("unclassified response (HTTP {status})")]
    Unclassified { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// A body or row failed to decode, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoDateRange | Self::NoIds { .. })
    }

    /// Returns `true` if this is a "not found" condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient transport failure a caller
    /// may choose to retry. The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
