use thiserror::Error;

/// Top-level error type for the `tickets-api` crate.
///
/// Every variant belongs to one of three families reported by
/// [`Error::kind`]: communication failures, rate limiting, and anything
/// unclassified. `tickets-core` re-wraps these into refresh failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Network failure or a non-success HTTP status.
    #[error("Error communicating with API: {message}")]
    Communication {
        message: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
    },

    /// Request exceeded the configured timeout.
    #[error("Timeout communicating with API after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Invalid base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Rate limiting ───────────────────────────────────────────────
    /// HTTP 429 from the backend. Carries the `Retry-After` hint in seconds.
    #[error("Rate limit exceeded. Retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Anything that doesn't fit the categories above.
    #[error("Unexpected error communicating with API: {message}")]
    Unknown { message: String },
}

/// Coarse classification of an [`Error`], mirroring how callers react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, timeout, or non-2xx status.
    Communication,
    /// HTTP 429.
    RateLimit,
    /// Everything else.
    Unknown,
}

impl Error {
    /// Classify this error into its family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Communication { .. } | Self::Timeout { .. } => ErrorKind::Communication,
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::InvalidUrl(_) | Self::Deserialization { .. } | Self::Unknown { .. } => {
                ErrorKind::Unknown
            }
        }
    }

    /// Returns `true` if this is a transient error worth retrying on the next tick.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Communication { status, .. } => status.is_none_or(|s| s >= 500),
            _ => false,
        }
    }

    /// The `Retry-After` hint, if this is a rate-limit error.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Map a `reqwest` failure into the taxonomy.
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Communication {
                message: err.to_string(),
                status: err.status().map(|s| s.as_u16()),
            }
        }
    }
}
