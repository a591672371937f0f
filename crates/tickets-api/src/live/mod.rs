// Live backend client
//
// Hand-written client for the events backend. Endpoint groups are split
// into inherent-method modules; the `EventsApi` impl below maps the shared
// capability onto them.

pub mod cities;
pub mod client;
pub mod events;
pub mod location;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use cities::fallback_cities;
pub use client::{DEFAULT_BASE_URL, LiveClient};

use crate::client::EventsApi;
use crate::error::Error;
use crate::models::{City, Currency, EventsResponse, ResolvedLocation};

#[async_trait]
impl EventsApi for LiveClient {
    async fn get_cities(&self) -> Vec<City> {
        self.list_cities().await
    }

    async fn get_events_by_city(
        &self,
        city_id: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        self.city_events(city_id, currency, limit).await
    }

    async fn search_events(
        &self,
        query: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        self.search(query, currency, limit).await
    }

    async fn get_nearby_events(
        &self,
        latitude: f64,
        longitude: f64,
        currency: Currency,
        radius_km: u32,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        self.nearby(latitude, longitude, currency, radius_km, limit)
            .await
    }

    async fn get_events_by_date(
        &self,
        city_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        self.calendar(city_id, date_from, date_to, currency, limit)
            .await
    }

    async fn resolve_location(&self, ip_address: Option<&str>) -> Result<ResolvedLocation, Error> {
        self.locate(ip_address).await
    }

    fn mode(&self) -> &'static str {
        "live"
    }
}
