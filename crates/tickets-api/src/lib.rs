// tickets-api: Async Rust client for the Tickets & Events booking backend,
// with an offline sample dataset behind the same interface.

pub mod client;
pub mod error;
pub mod live;
pub mod models;
pub mod rate_limit;
pub mod sample;
pub mod transport;

pub use client::{DEFAULT_LIMIT, DEFAULT_RADIUS_KM, EventsApi};
pub use error::{Error, ErrorKind};
pub use live::{DEFAULT_BASE_URL, LiveClient, fallback_cities};
pub use models::{
    City, Currency, DetectedFrom, Event, EventImage, EventsResponse, Language, LocationType,
    ResolvedLocation,
};
pub use rate_limit::RateLimiter;
pub use sample::SampleClient;
pub use transport::TransportConfig;
