// ── Command API ──
//
// Every callable operation flows through the `Command` enum. The
// coordinator routes each variant; `ServiceRegistry` maps service names
// and JSON payloads onto commands for boundary layers such as the CLI.

mod registry;
pub mod requests;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tickets_api::EventsResponse;

pub use registry::{ServiceHandler, ServiceRegistry, ServiceResponse};
pub use requests::{BookingUrlRequest, EventsByDateRequest, RefreshRequest, SearchEventsRequest};

/// Service names exposed by [`ServiceRegistry::with_default_services`].
pub const SERVICE_SEARCH_EVENTS: &str = "search_events";
pub const SERVICE_GET_EVENTS_BY_DATE: &str = "get_events_by_date";
pub const SERVICE_GENERATE_BOOKING_URL: &str = "generate_booking_url";
pub const SERVICE_REFRESH_EVENTS: &str = "refresh_events";

/// All operations callable on a coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SearchEvents(SearchEventsRequest),
    GetEventsByDate(EventsByDateRequest),
    GenerateBookingUrl(BookingUrlRequest),
    RefreshEvents(RefreshRequest),
}

impl Command {
    /// Service name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchEvents(_) => SERVICE_SEARCH_EVENTS,
            Self::GetEventsByDate(_) => SERVICE_GET_EVENTS_BY_DATE,
            Self::GenerateBookingUrl(_) => SERVICE_GENERATE_BOOKING_URL,
            Self::RefreshEvents(_) => SERVICE_REFRESH_EVENTS,
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommandResult {
    Events(EventsResponse),
    BookingUrl {
        booking_url: String,
        event_title: String,
        event_id: u64,
    },
    Refreshed,
}

impl CommandResult {
    /// Flatten into the payload fields of a service response.
    pub fn into_payload(self) -> Map<String, Value> {
        let value = match self {
            Self::Events(results) => json!({ "results": results }),
            Self::BookingUrl {
                booking_url,
                event_title,
                event_id,
            } => json!({
                "booking_url": booking_url,
                "event_title": event_title,
                "event_id": event_id,
            }),
            Self::Refreshed => json!({}),
        };

        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
