// The `EventsApi` capability
//
// One interface, two implementations picked at construction time:
// `LiveClient` talks to the booking backend, `SampleClient` serves the
// bundled dataset. Callers hold an `Arc<dyn EventsApi>` and never branch
// on which one they got.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Error;
use crate::models::{City, Currency, EventsResponse, ResolvedLocation};

/// Default page size for every event query.
pub const DEFAULT_LIMIT: usize = 50;
/// Default search radius for nearby queries, in kilometres.
pub const DEFAULT_RADIUS_KM: u32 = 50;

/// Read-only access to the events backend.
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// List known cities.
    ///
    /// Never fails: implementations degrade to a built-in list instead.
    async fn get_cities(&self) -> Vec<City>;

    /// Events for one city.
    async fn get_events_by_city(
        &self,
        city_id: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error>;

    /// Free-text search across all cities.
    async fn search_events(
        &self,
        query: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error>;

    /// Events within `radius_km` of a coordinate.
    async fn get_nearby_events(
        &self,
        latitude: f64,
        longitude: f64,
        currency: Currency,
        radius_km: u32,
        limit: usize,
    ) -> Result<EventsResponse, Error>;

    /// Events of one city available within `[date_from, date_to]`.
    async fn get_events_by_date(
        &self,
        city_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error>;

    /// Resolve a city for the given IP, or for the caller when `None`.
    async fn resolve_location(&self, ip_address: Option<&str>) -> Result<ResolvedLocation, Error>;

    /// Short label for logs (`live` / `sample`).
    fn mode(&self) -> &'static str;
}
