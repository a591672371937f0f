// Event query endpoints
//
// City, search, nearby, and calendar (date range) listings. All four share
// the `EventsResponse` shape; responses are truncated to the requested
// limit so `total_count` always matches the events returned.

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::error::Error;
use crate::live::client::LiveClient;
use crate::models::{Currency, EventsResponse};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl LiveClient {
    /// Events for one city.
    ///
    /// `GET /events/city/{city_id}?currency&limit`
    pub async fn city_events(
        &self,
        city_id: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(city_id, %currency, limit, "fetching city events");
        let query = [
            ("currency", currency.to_string()),
            ("limit", limit.to_string()),
        ];

        self.fetch_events(&["events", "city", city_id], &query, limit)
            .await
            .inspect_err(|e| error!(city_id, error = %e, "error fetching events for city"))
    }

    /// Free-text search.
    ///
    /// `GET /events/search?q&currency&limit`
    pub async fn search(
        &self,
        text: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(query = text, %currency, limit, "searching events");
        let query = [
            ("q", text.to_owned()),
            ("currency", currency.to_string()),
            ("limit", limit.to_string()),
        ];

        self.fetch_events(&["events", "search"], &query, limit)
            .await
            .inspect_err(|e| error!(query = text, error = %e, "error searching events"))
    }

    /// Events near a coordinate.
    ///
    /// `GET /events/nearby?lat&lon&radius&currency&limit`
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        currency: Currency,
        radius_km: u32,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(latitude, longitude, radius_km, "fetching nearby events");
        let query = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("radius", radius_km.to_string()),
            ("currency", currency.to_string()),
            ("limit", limit.to_string()),
        ];

        self.fetch_events(&["events", "nearby"], &query, limit)
            .await
            .inspect_err(|e| {
                error!(latitude, longitude, error = %e, "error fetching nearby events");
            })
    }

    /// Events of a city within a date range.
    ///
    /// `GET /events/calendar?cityId&date_from&date_to&currency&limit`
    pub async fn calendar(
        &self,
        city_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        debug!(city_id, %date_from, %date_to, "fetching events by date");
        let query = [
            ("cityId", city_id.to_owned()),
            ("date_from", date_from.format(DATE_FORMAT).to_string()),
            ("date_to", date_to.format(DATE_FORMAT).to_string()),
            ("currency", currency.to_string()),
            ("limit", limit.to_string()),
        ];

        self.fetch_events(&["events", "calendar"], &query, limit)
            .await
            .inspect_err(|e| {
                error!(%date_from, %date_to, error = %e, "error fetching events for date range");
            })
    }

    async fn fetch_events(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        let mut resp: EventsResponse = self.get(segments, query).await?;
        resp.truncate(limit);
        Ok(resp)
    }
}
