// tickets-core: Refresh coordinator, booking helpers and command dispatch
// between tickets-api and its consumers (CLI).

pub mod booking;
pub mod calendar;
pub mod command;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod sensor;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use booking::{
    BookingParams, EnrichedEvent, format_price, generate_booking_url, generate_qr_code,
    process_event_data,
};
pub use calendar::{CalendarEntry, EventCalendar};
pub use command::{
    BookingUrlRequest, Command, CommandResult, EventsByDateRequest, RefreshRequest,
    SearchEventsRequest, ServiceRegistry, ServiceResponse,
};
pub use config::{AUTO_CITY, CitySelection, CoordinatorConfig};
pub use coordinator::{Coordinator, CoordinatorState};
pub use error::{CoreError, UpdateFailureKind};
pub use sensor::{SensorKind, SensorState};
pub use store::{CoordinatorSnapshot, SnapshotStream};

// Re-export the wire types consumers need alongside the coordinator.
pub use tickets_api::{City, Currency, Event, EventsResponse, Language, ResolvedLocation};
