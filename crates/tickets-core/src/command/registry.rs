// ── Named service dispatch ──
//
// Built once at startup and passed by reference to whatever drives it.
// Handlers only validate and translate the payload; execution goes through
// `Coordinator::execute`, so the registry never touches client state.

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use super::{
    BookingUrlRequest, Command, EventsByDateRequest, RefreshRequest, SERVICE_GENERATE_BOOKING_URL,
    SERVICE_GET_EVENTS_BY_DATE, SERVICE_REFRESH_EVENTS, SERVICE_SEARCH_EVENTS,
    SearchEventsRequest,
};
use crate::coordinator::Coordinator;
use crate::error::CoreError;

/// Translates a JSON payload into a [`Command`].
pub type ServiceHandler = fn(Value) -> Result<Command, CoreError>;

/// Outcome of a service call: `{success, ...payload}` or `{success, error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceResponse {
    pub fn ok(payload: Map<String, Value>) -> Self {
        Self {
            success: true,
            payload,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: Map::new(),
            error: Some(error.into()),
        }
    }
}

/// Mapping from service name to handler.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    handlers: IndexMap<&'static str, ServiceHandler>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four standard services.
    pub fn with_default_services() -> Self {
        let mut registry = Self::new();
        registry.register(SERVICE_SEARCH_EVENTS, |payload| {
            Ok(Command::SearchEvents(parse::<SearchEventsRequest>(payload)?))
        });
        registry.register(SERVICE_GET_EVENTS_BY_DATE, |payload| {
            Ok(Command::GetEventsByDate(parse::<EventsByDateRequest>(payload)?))
        });
        registry.register(SERVICE_GENERATE_BOOKING_URL, |payload| {
            let req = parse::<BookingUrlRequest>(payload)?;
            if req.event_id == 0 {
                return Err(CoreError::Validation {
                    message: "event_id must be a positive integer".into(),
                });
            }
            Ok(Command::GenerateBookingUrl(req))
        });
        registry.register(SERVICE_REFRESH_EVENTS, |payload| {
            Ok(Command::RefreshEvents(parse::<RefreshRequest>(payload)?))
        });
        registry
    }

    /// Add or replace a handler.
    pub fn register(&mut self, name: &'static str, handler: ServiceHandler) {
        self.handlers.insert(name, handler);
    }

    /// Registered service names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Validate `payload` for service `name` without executing it.
    pub fn command(&self, name: &str, payload: Value) -> Result<Command, CoreError> {
        let handler = self.handlers.get(name).ok_or_else(|| CoreError::Validation {
            message: format!("Unknown service: {name}"),
        })?;
        handler(payload)
    }

    /// Run service `name`. Failures are reported in the response, never raised.
    pub async fn call(&self, name: &str, coordinator: &Coordinator, payload: Value) -> ServiceResponse {
        debug!(service = name, "service call");

        let result = match self.command(name, payload) {
            Ok(cmd) => coordinator.execute(cmd).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(result) => {
                info!(service = name, "service call succeeded");
                ServiceResponse::ok(result.into_payload())
            }
            Err(e) => {
                error!(service = name, error = %e, "service call failed");
                ServiceResponse::failed(e.to_string())
            }
        }
    }
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, CoreError> {
    let payload = if payload.is_null() {
        Value::Object(Map::new())
    } else {
        payload
    };
    serde_json::from_value(payload).map_err(|e| CoreError::Validation {
        message: format!("invalid service data: {e}"),
    })
}
