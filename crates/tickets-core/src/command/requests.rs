// ── Typed request structs for Command payloads ──
//
// Deserialised from service-call JSON. Currency and language are checked
// against their closed sets by serde; dates must be `YYYY-MM-DD`.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tickets_api::{Currency, Language};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchEventsRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsByDateRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingUrlRequest {
    /// Must be positive.
    pub event_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeslot: Option<String>,
    /// Ticket variant id → quantity.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tickets: IndexMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshRequest {
    /// Informational only; every refresh updates the whole snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,
}
