// ── Core error types ──
//
// User-facing errors from tickets-core. Query passthroughs surface the
// client's classification (communication, rate limit, API); refreshes fold
// every failure into `UpdateFailed` with the original message kept.

use strum::Display;
use thiserror::Error;

/// Why a refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UpdateFailureKind {
    /// Network, timeout, or non-2xx status.
    Communication,
    /// Any other client error: rate limiting, bad payloads, bad URLs,
    /// unclassified client failures.
    Api,
    /// Failures raised outside the client.
    Unexpected,
    /// `auto` city: location resolution failed and no city list was available.
    NoCityAvailable,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Refresh ──────────────────────────────────────────────────────
    #[error("{}", update_failed_message(*kind, message))]
    UpdateFailed {
        kind: UpdateFailureKind,
        message: String,
    },

    #[error("City not resolved yet. Please wait for initial data update.")]
    CityNotResolved,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No event data available")]
    NoData,

    #[error("Event ID {id} not found")]
    EventNotFound { id: u64 },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Error communicating with API: {message}")]
    Communication { message: String },

    #[error("Rate limit exceeded. Retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("API error: {message}")]
    Api { message: String },
}

fn update_failed_message(kind: UpdateFailureKind, message: &str) -> String {
    match kind {
        UpdateFailureKind::Communication => format!("Error communicating with API: {message}"),
        UpdateFailureKind::Api => format!("API error: {message}"),
        UpdateFailureKind::Unexpected => format!("Unexpected error: {message}"),
        UpdateFailureKind::NoCityAvailable if message.is_empty() => {
            "No city available and location resolution failed".to_owned()
        }
        UpdateFailureKind::NoCityAvailable => {
            format!("No city available and location resolution failed: {message}")
        }
    }
}

impl CoreError {
    /// Fold any error raised during a refresh into `UpdateFailed`.
    pub(crate) fn into_update_failed(self) -> Self {
        let (kind, message) = match self {
            Self::UpdateFailed { .. } => return self,
            Self::Communication { message } => (UpdateFailureKind::Communication, message),
            Self::Api { message } => (UpdateFailureKind::Api, message),
            Self::RateLimited { .. } => (UpdateFailureKind::Api, self.to_string()),
            other => (UpdateFailureKind::Unexpected, other.to_string()),
        };
        Self::UpdateFailed { kind, message }
    }

    /// The refresh failure kind, if this is an `UpdateFailed`.
    pub fn update_failure_kind(&self) -> Option<UpdateFailureKind> {
        match self {
            Self::UpdateFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tickets_api::Error> for CoreError {
    fn from(err: tickets_api::Error) -> Self {
        match err {
            tickets_api::Error::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            tickets_api::Error::Communication { message, .. } => {
                CoreError::Communication { message }
            }
            tickets_api::Error::Timeout { .. } => CoreError::Communication {
                message: err.to_string(),
            },
            tickets_api::Error::InvalidUrl(_) => CoreError::Api {
                message: err.to_string(),
            },
            tickets_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
            },
            tickets_api::Error::Unknown { message } => CoreError::Api { message },
        }
    }
}
