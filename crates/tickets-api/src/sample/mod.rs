// Sample-data client
//
// Serves the bundled dataset through the same `EventsApi` contract as the
// live client. No I/O and no rate limiting; every call succeeds.

mod dataset;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::client::EventsApi;
use crate::error::Error;
use crate::models::{
    City, Currency, DetectedFrom, Event, EventsResponse, LocationType, ResolvedLocation,
};

/// City served for nearby queries and location resolution.
pub const SAMPLE_HOME_CITY: &str = "c76753";

const DESTINATION_URL: &str = "https://www.tiqets.com";

/// Offline `EventsApi` backed by a fixed dataset.
#[derive(Debug, Clone)]
pub struct SampleClient {
    today: NaiveDate,
    cities: Vec<City>,
    events: Vec<Event>,
}

impl SampleClient {
    /// Dataset anchored at the local current date.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Dataset anchored at a fixed date.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            cities: dataset::cities(),
            events: dataset::events(today),
        }
    }

    /// The date relative dates were computed from.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn city_response(&self, city_id: &str, currency: Currency, limit: usize) -> EventsResponse {
        let events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| city_id.is_empty() || e.city_id == city_id)
            .take(limit)
            .cloned()
            .collect();

        let destination_title = self
            .cities
            .iter()
            .find(|c| !city_id.is_empty() && c.id == city_id)
            .map_or_else(|| "Multiple Cities".to_owned(), |c| c.name.clone());

        EventsResponse {
            total_count: events.len(),
            events,
            destination_title,
            destination_url: DESTINATION_URL.to_owned(),
            location_type: LocationType::City,
            currency: currency.to_string(),
            query: None,
        }
    }
}

impl Default for SampleClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether any date of `event` falls in `[from, to]`. Events with no dates
/// at all are treated as always available.
fn available_between(event: &Event, from: NaiveDate, to: NaiveDate) -> bool {
    let mut dates = event
        .date
        .iter()
        .chain(event.available_dates.iter())
        .peekable();

    if dates.peek().is_none() {
        return true;
    }

    dates.any(|d| {
        NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok_and(|d| (from..=to).contains(&d))
    })
}

#[async_trait]
impl EventsApi for SampleClient {
    async fn get_cities(&self) -> Vec<City> {
        debug!("returning sample cities");
        self.cities.clone()
    }

    async fn get_events_by_city(
        &self,
        city_id: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(city_id, "returning sample events for city");
        Ok(self.city_response(city_id, currency, limit))
    }

    async fn search_events(
        &self,
        query: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(query, "returning sample search results");
        let needle = query.to_lowercase();
        let events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
                    || e.kind.to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect();

        Ok(EventsResponse {
            total_count: events.len(),
            events,
            destination_title: format!("Search: {query}"),
            destination_url: DESTINATION_URL.to_owned(),
            location_type: LocationType::Search,
            currency: currency.to_string(),
            query: Some(query.to_owned()),
        })
    }

    async fn get_nearby_events(
        &self,
        latitude: f64,
        longitude: f64,
        currency: Currency,
        radius_km: u32,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(latitude, longitude, radius_km, "returning sample nearby events");
        let mut resp = self.city_response(SAMPLE_HOME_CITY, currency, limit);
        resp.location_type = LocationType::Nearby;
        Ok(resp)
    }

    async fn get_events_by_date(
        &self,
        city_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(city_id, %date_from, %date_to, "returning sample events for date range");
        let mut resp = self.city_response(city_id, currency, usize::MAX);
        resp.events
            .retain(|e| available_between(e, date_from, date_to));
        resp.truncate(limit);
        Ok(resp)
    }

    async fn resolve_location(&self, ip_address: Option<&str>) -> Result<ResolvedLocation, Error> {
        debug!(?ip_address, "returning sample location");
        Ok(ResolvedLocation {
            city_id: SAMPLE_HOME_CITY.to_owned(),
            city_name: "Bucharest".to_owned(),
            country: "Romania".to_owned(),
            country_code: "RO".to_owned(),
            latitude: 44.4268,
            longitude: 26.1025,
            detected_from: if ip_address.is_some() {
                DetectedFrom::Ip
            } else {
                DetectedFrom::Default
            },
        })
    }

    fn mode(&self) -> &'static str {
        "sample"
    }
}
