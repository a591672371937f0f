//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tickets_config::ConfigError;
use tickets_core::{CoreError, UpdateFailureKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const RATE_LIMITED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(tickets::connection_failed),
        help(
            "Check that the events backend is reachable.\n\
             Try: tickets --sample events"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Rate limit exceeded. Retry after {retry_after_secs}s")]
    #[diagnostic(
        code(tickets::rate_limited),
        help("Wait before retrying, or lower rate_limit_calls in your profile.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── City resolution ──────────────────────────────────────────────
    #[error("No city available and location resolution failed")]
    #[diagnostic(
        code(tickets::no_city),
        help(
            "Pick a city explicitly with --city <ID>.\n\
             Run: tickets cities"
        )
    )]
    NoCity,

    #[error("{message}")]
    #[diagnostic(code(tickets::no_data), help("Run: tickets refresh"))]
    NoData { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(tickets::not_found),
        help("Run: tickets {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(tickets::api_error))]
    ApiError { message: String },

    #[error("Service '{service}' failed: {message}")]
    #[diagnostic(code(tickets::service_failed), help("Run: tickets services"))]
    ServiceFailed { service: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tickets::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tickets::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tickets config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(tickets::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tickets::json), help("Payloads must be a JSON object."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UpdateFailed { kind, .. } => match kind {
                UpdateFailureKind::NoCityAvailable => CliError::NoCity,
                UpdateFailureKind::Communication => CliError::ConnectionFailed {
                    message: err.to_string(),
                },
                UpdateFailureKind::Api | UpdateFailureKind::Unexpected => CliError::ApiError {
                    message: err.to_string(),
                },
            },

            CoreError::CityNotResolved | CoreError::NoData => CliError::NoData {
                message: err.to_string(),
            },

            CoreError::EventNotFound { id } => CliError::NotFound {
                resource_type: "event".into(),
                identifier: id.to_string(),
                list_command: "events".into(),
            },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Communication { .. } => CliError::ConnectionFailed {
                message: err.to_string(),
            },

            CoreError::RateLimited { retry_after_secs } => {
                CliError::RateLimited { retry_after_secs }
            }

            CoreError::Api { .. } => CliError::ApiError {
                message: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(run: tickets config profiles)".into(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
        }
    }
}
