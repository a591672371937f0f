// Wire models shared by the live and sample clients.
//
// The backend mixes camelCase (`cityId`, `countryCode`) and snake_case keys;
// both spellings are accepted on input. Every event field except `id` is
// optional on the wire and defaults when absent.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ── Reference data ──────────────────────────────────────────────────

/// A destination city known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, rename = "countryCode", alias = "country_code")]
    pub country_code: String,
}

impl City {
    pub fn new(id: &str, name: &str, country: &str, country_code: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            country: country.to_owned(),
            country_code: country_code.to_owned(),
        }
    }
}

/// Supported display/booking currencies.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Ron,
    Chf,
    Aud,
    Cad,
    Jpy,
    Cny,
}

impl Currency {
    /// Display symbol placed in front of an amount.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Ron => "lei",
            Self::Chf => "Fr",
            Self::Aud => "A$",
            Self::Cad => "C$",
            Self::Jpy | Self::Cny => "¥",
        }
    }

    /// Currencies conventionally shown without minor units.
    pub fn is_whole_units(self) -> bool {
        matches!(self, Self::Jpy | Self::Cny)
    }
}

/// Ticket languages accepted by the booking page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Eng,
    Fra,
    Deu,
    Spa,
    Ita,
    Por,
    Nld,
    Ron,
}

// ── Events ──────────────────────────────────────────────────────────

/// One promotional image of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A bookable ticket/event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, rename = "cityId", alias = "city_id")]
    pub city_id: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
    #[serde(default = "default_currency_code")]
    pub currency: String,
    /// Average rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u64,
    /// Free-form category such as `tour`, `museum`, `food_tour`.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_checkout_disabled: bool,
    #[serde(default, alias = "bookingUrl")]
    pub booking_url: String,
    /// Single scheduled date, when the listing has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// ISO dates with availability, in backend order.
    #[serde(default)]
    pub available_dates: Vec<String>,
    #[serde(default)]
    pub images: Vec<EventImage>,
}

fn default_currency_code() -> String {
    Currency::default().to_string()
}

impl Event {
    /// The dates this event is listed on: the scheduled `date` if present,
    /// otherwise every available date.
    pub fn listed_dates(&self) -> Vec<&str> {
        match self.date.as_deref() {
            Some(date) => vec![date],
            None => self.available_dates.iter().map(String::as_str).collect(),
        }
    }
}

/// Which kind of query produced an [`EventsResponse`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocationType {
    #[default]
    City,
    Search,
    Nearby,
}

/// A page of events plus destination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, alias = "destinationTitle")]
    pub destination_title: String,
    #[serde(default, alias = "destinationUrl")]
    pub destination_url: String,
    #[serde(default, alias = "locationType")]
    pub location_type: LocationType,
    #[serde(default, alias = "totalCount")]
    pub total_count: usize,
    #[serde(default)]
    pub currency: String,
    /// Echo of the search query for search responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl EventsResponse {
    /// Keep at most `limit` events and make `total_count` agree with them.
    pub fn truncate(&mut self, limit: usize) {
        self.events.truncate(limit);
        self.total_count = self.events.len();
    }

    /// Look up an event by id.
    pub fn find(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ── Location ────────────────────────────────────────────────────────

/// How a location was determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetectedFrom {
    Ip,
    #[default]
    Default,
}

/// Result of resolving the caller's location to a known city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    #[serde(rename = "cityId", alias = "city_id")]
    pub city_id: String,
    #[serde(default, rename = "city", alias = "city_name")]
    pub city_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, alias = "countryCode")]
    pub country_code: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub detected_from: DetectedFrom,
}
