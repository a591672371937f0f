// ── Sensor projection ──
//
// Summarises the snapshot as a count plus attributes. Both sensors read the
// configured city's listings; they differ only in name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};
use tickets_api::{Currency, LocationType};

use crate::booking::{EnrichedEvent, process_event_data};
use crate::store::CoordinatorSnapshot;

/// Maximum number of enriched events carried in sensor attributes.
pub const MAX_SENSOR_EVENTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SensorKind {
    Today,
    Nearby,
}

impl SensorKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Today => "Today Events",
            Self::Nearby => "Nearby Events",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAttributes {
    pub events: Vec<EnrichedEvent>,
    pub destination_title: String,
    pub destination_url: String,
    pub location_type: LocationType,
    pub last_updated: DateTime<Utc>,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorState {
    pub kind: SensorKind,
    /// False until a refresh has succeeded, and after any failed one.
    pub available: bool,
    /// Number of events in the snapshot.
    pub value: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SensorAttributes>,
}

impl SensorState {
    pub fn project(
        kind: SensorKind,
        last_update_success: bool,
        snapshot: Option<&CoordinatorSnapshot>,
    ) -> Self {
        let Some(snapshot) = snapshot else {
            return Self {
                kind,
                available: false,
                value: 0,
                attributes: None,
            };
        };

        let resp = &snapshot.events;
        let events = resp
            .events
            .iter()
            .take(MAX_SENSOR_EVENTS)
            .map(|e| process_event_data(e, snapshot.currency))
            .collect();

        Self {
            kind,
            available: last_update_success,
            value: resp.events.len(),
            attributes: Some(SensorAttributes {
                events,
                destination_title: resp.destination_title.clone(),
                destination_url: resp.destination_url.clone(),
                location_type: resp.location_type,
                last_updated: snapshot.fetched_at,
                currency: snapshot.currency,
            }),
        }
    }
}
