// ── Calendar projection ──
//
// Expands the snapshot into dated entries: one per listed date of each
// event, 10:00 to 18:00 local wall-clock time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;
use tickets_api::{Event, EventsResponse};
use tracing::{debug, warn};

const START_HOUR: u32 = 10;
const DURATION_HOURS: i64 = 8;

/// One dated occurrence of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    /// `{event_id}_{date}` as listed by the backend.
    pub uid: String,
    pub event_id: u64,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Calendar view over one snapshot, sorted by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventCalendar {
    entries: Vec<CalendarEntry>,
}

impl EventCalendar {
    /// Build entries from `events`. Undated events are placed on `today`.
    pub fn build(events: &EventsResponse, today: NaiveDate) -> Self {
        let fallback = today.format("%Y-%m-%d").to_string();
        let mut entries = Vec::new();

        for event in &events.events {
            let mut dates = event.listed_dates();
            if dates.is_empty() {
                dates.push(&fallback);
            }

            for date_str in dates {
                let Some(date) = parse_iso_date(date_str) else {
                    warn!(event_id = event.id, date = date_str, "error parsing event date");
                    continue;
                };
                let start = date.and_time(start_time());
                entries.push(CalendarEntry {
                    uid: format!("{}_{date_str}", event.id),
                    event_id: event.id,
                    summary: if event.title.is_empty() {
                        "Event".to_owned()
                    } else {
                        event.title.clone()
                    },
                    description: describe(event),
                    location: location(event),
                    start,
                    end: start + TimeDelta::hours(DURATION_HOURS),
                });
            }
        }

        entries.sort_by_key(|e| e.start);
        debug!(entries = entries.len(), "built calendar");
        Self { entries }
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries overlapping `[start, end)`.
    pub fn events_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&CalendarEntry> {
        self.entries
            .iter()
            .filter(|e| e.start < end && e.end > start)
            .collect()
    }

    /// The first entry starting at or after `now`, else the earliest entry.
    pub fn next_event(&self, now: NaiveDateTime) -> Option<&CalendarEntry> {
        self.entries
            .iter()
            .find(|e| e.start >= now)
            .or_else(|| self.entries.first())
    }
}

fn start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

fn location(event: &Event) -> String {
    format!("{}, {}", event.city, event.country)
        .trim_matches(|c| c == ',' || c == ' ')
        .to_owned()
}

fn describe(event: &Event) -> String {
    let mut parts = Vec::new();

    if !event.description.is_empty() {
        parts.push(event.description.clone());
    }

    if event.price > 0.0 {
        parts.push(format!(
            "\n💰 Price: {:.2} {}",
            event.price, event.currency
        ));
    } else {
        parts.push("\n💰 Free Entry".to_owned());
    }

    if event.rating > 0.0 {
        parts.push(format!(
            "⭐ Rating: {:?}/5 ({} reviews)",
            event.rating, event.rating_count
        ));
    }

    if !event.kind.is_empty() {
        parts.push(format!("📍 Type: {}", title_case(&event.kind.replace('_', " "))));
    }

    if !event.booking_url.is_empty() {
        parts.push(format!("\n🎫 Book now: {}", event.booking_url));
    }

    parts.join("\n")
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn response() -> EventsResponse {
        serde_json::from_value(json!({
            "events": [
                {
                    "id": 1,
                    "title": "Food Walk",
                    "description": "Eat well.",
                    "city": "Bucharest",
                    "country": "Romania",
                    "price": 42.0,
                    "currency": "EUR",
                    "rating": 4.8,
                    "rating_count": 512,
                    "type": "food_tour",
                    "booking_url": "https://b/food",
                    "available_dates": ["2026-04-12", "2026-04-10"],
                },
                {
                    "id": 2,
                    "title": "Museum",
                    "city": "Paris",
                    "date": "2026-04-11",
                    "available_dates": ["2026-04-20"],
                },
                {"id": 3, "title": "Anytime"},
                {"id": 4, "title": "Broken", "date": "next tuesday"},
            ]
        }))
        .unwrap()
    }

    #[test]
    fn expands_sorts_and_skips_bad_dates() {
        let cal = EventCalendar::build(&response(), day(5));
        let uids: Vec<_> = cal.entries().iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids, vec!["3_2026-04-05", "1_2026-04-10", "2_2026-04-11", "1_2026-04-12"]);

        let first = &cal.entries()[0];
        assert_eq!(first.start, at(5, 10));
        assert_eq!(first.end, at(5, 18));
    }

    #[test]
    fn description_and_location() {
        let cal = EventCalendar::build(&response(), day(5));
        let food = cal.entries().iter().find(|e| e.event_id == 1).unwrap();

        assert_eq!(food.location, "Bucharest, Romania");
        assert_eq!(
            food.description,
            "Eat well.\n\n💰 Price: 42.00 EUR\n⭐ Rating: 4.8/5 (512 reviews)\n📍 Type: Food Tour\n\n🎫 Book now: https://b/food"
        );

        let museum = cal.entries().iter().find(|e| e.event_id == 2).unwrap();
        assert_eq!(museum.location, "Paris");
        assert_eq!(museum.description, "\n💰 Free Entry");
    }

    #[test]
    fn whole_ratings_keep_a_decimal() {
        let event: Event = serde_json::from_value(json!({
            "id": 9,
            "title": "Top",
            "rating": 5.0,
            "rating_count": 3,
        }))
        .unwrap();
        assert_eq!(describe(&event), "\n💰 Free Entry\n⭐ Rating: 5.0/5 (3 reviews)");
    }

    #[test]
    fn range_uses_overlap() {
        let cal = EventCalendar::build(&response(), day(5));

        let hits = cal.events_in_range(at(10, 17), at(11, 10));
        let ids: Vec<_> = hits.iter().map(|e| e.uid.as_str()).collect();
        // A window ending at 10:00 on the 11th excludes the museum starting then.
        assert_eq!(ids, vec!["1_2026-04-10"]);
    }

    #[test]
    fn next_event_falls_back_to_first() {
        let cal = EventCalendar::build(&response(), day(5));
        assert_eq!(cal.next_event(at(11, 0)).unwrap().uid, "2_2026-04-11");
        assert_eq!(cal.next_event(at(30, 0)).unwrap().uid, "3_2026-04-05");
        assert!(EventCalendar::default().next_event(at(1, 0)).is_none());
    }
}
