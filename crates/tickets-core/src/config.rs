// ── Runtime coordinator configuration ──
//
// Describes which city and currency to track and how to reach the backend.
// The CLI (via tickets-config) builds a `CoordinatorConfig` and hands it
// in; core never reads config files.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tickets_api::{Currency, DEFAULT_BASE_URL, DEFAULT_LIMIT};
use url::Url;

/// Sentinel accepted in place of a city id.
pub const AUTO_CITY: &str = "auto";

/// Default snapshot refresh interval (once a day).
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Which city the coordinator tracks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CitySelection {
    /// Resolve from the caller's location on first refresh.
    #[default]
    Auto,
    /// A concrete backend city id.
    Fixed(String),
}

impl CitySelection {
    /// The concrete city id, if one is configured.
    pub fn city_id(&self) -> Option<&str> {
        match self {
            Self::Auto => None,
            Self::Fixed(id) => Some(id),
        }
    }
}

impl FromStr for CitySelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(AUTO_CITY) {
            Ok(Self::Auto)
        } else {
            Ok(Self::Fixed(s.to_owned()))
        }
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO_CITY),
            Self::Fixed(id) => f.write_str(id),
        }
    }
}

/// Configuration for one coordinator instance.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub city: CitySelection,
    /// Display name for a fixed city; replaced by the resolved name for `auto`.
    pub city_name: Option<String>,
    pub currency: Currency,
    /// Serve the bundled dataset instead of calling the backend.
    pub use_sample_data: bool,
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Background refresh period. Zero disables the background task.
    pub update_interval: Duration,
    pub rate_limit_calls: usize,
    pub rate_limit_period: Duration,
    /// Page size for snapshot and passthrough queries.
    pub event_limit: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            city: CitySelection::Auto,
            city_name: None,
            currency: Currency::default(),
            use_sample_data: true,
            base_url: default_base_url(),
            timeout: tickets_api::transport::DEFAULT_TIMEOUT,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            rate_limit_calls: tickets_api::rate_limit::DEFAULT_MAX_CALLS,
            rate_limit_period: tickets_api::rate_limit::DEFAULT_PERIOD,
            event_limit: DEFAULT_LIMIT,
        }
    }
}

/// The production backend URL.
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}
