// Coordinator behaviour against scripted clients.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use tickets_api::{
    City, Currency, DetectedFrom, Error, EventsApi, EventsResponse, LocationType,
    ResolvedLocation, SampleClient,
};
use tickets_core::{
    CitySelection, Coordinator, CoordinatorConfig, CoordinatorState, CoreError, SensorKind,
    ServiceRegistry, UpdateFailureKind,
};

// ── Scripted client ─────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedApi {
    resolve_fails: bool,
    cities: Vec<City>,
    events_fail: AtomicBool,
    resolve_calls: AtomicUsize,
    city_calls: AtomicUsize,
}

impl ScriptedApi {
    fn with_cities(resolve_fails: bool, cities: Vec<City>) -> Arc<Self> {
        Arc::new(Self {
            resolve_fails,
            cities,
            ..Self::default()
        })
    }
}

#[async_trait]
impl EventsApi for ScriptedApi {
    async fn get_cities(&self) -> Vec<City> {
        self.cities.clone()
    }

    async fn get_events_by_city(
        &self,
        city_id: &str,
        currency: Currency,
        limit: usize,
    ) -> Result<EventsResponse, Error> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        if self.events_fail.load(Ordering::SeqCst) {
            return Err(Error::Communication {
                message: "HTTP 503".into(),
                status: Some(503),
            });
        }
        let mut resp: EventsResponse = serde_json::from_value(json!({
            "events": [
                {"id": 11, "title": "Tour", "cityId": city_id, "booking_url": "https://b/11"},
                {"id": 12, "title": "Museum", "cityId": city_id},
            ],
            "destination_title": city_id,
            "currency": currency.to_string(),
        }))
        .unwrap();
        resp.truncate(limit);
        Ok(resp)
    }

    async fn search_events(
        &self,
        query: &str,
        _currency: Currency,
        _limit: usize,
    ) -> Result<EventsResponse, Error> {
        Ok(EventsResponse {
            location_type: LocationType::Search,
            query: Some(query.to_owned()),
            ..EventsResponse::default()
        })
    }

    async fn get_nearby_events(
        &self,
        _latitude: f64,
        _longitude: f64,
        _currency: Currency,
        _radius_km: u32,
        _limit: usize,
    ) -> Result<EventsResponse, Error> {
        Ok(EventsResponse::default())
    }

    async fn get_events_by_date(
        &self,
        city_id: &str,
        _date_from: NaiveDate,
        _date_to: NaiveDate,
        _currency: Currency,
        _limit: usize,
    ) -> Result<EventsResponse, Error> {
        Ok(EventsResponse {
            destination_title: city_id.to_owned(),
            ..EventsResponse::default()
        })
    }

    async fn resolve_location(&self, _ip: Option<&str>) -> Result<ResolvedLocation, Error> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.resolve_fails {
            return Err(Error::Communication {
                message: "geo lookup down".into(),
                status: None,
            });
        }
        Ok(ResolvedLocation {
            city_id: "c47717".into(),
            city_name: "Rome".into(),
            country: "Italy".into(),
            country_code: "IT".into(),
            latitude: 41.9,
            longitude: 12.5,
            detected_from: DetectedFrom::Default,
        })
    }

    fn mode(&self) -> &'static str {
        "scripted"
    }
}

fn config(city: CitySelection) -> CoordinatorConfig {
    CoordinatorConfig {
        city,
        update_interval: Duration::ZERO,
        ..CoordinatorConfig::default()
    }
}

fn paris() -> Vec<City> {
    vec![
        City::new("c67097", "Paris", "France", "FR"),
        City::new("c76753", "Bucharest", "Romania", "RO"),
    ]
}

// ── City resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn auto_city_uses_resolved_location() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api);

    let snapshot = coordinator.refresh().await.unwrap();
    assert_eq!(snapshot.city_id, "c47717");
    assert_eq!(snapshot.city_name, "Rome");
    assert_eq!(coordinator.state(), CoordinatorState::Ready);
    assert!(coordinator.last_update_success());
}

#[tokio::test]
async fn auto_city_falls_back_to_first_listed_city() {
    let api = ScriptedApi::with_cities(true, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api);

    let snapshot = coordinator.refresh().await.unwrap();
    assert_eq!(snapshot.city_id, "c67097");
    assert_eq!(snapshot.city_name, "Paris");
}

#[tokio::test]
async fn auto_city_without_any_city_fails() {
    let api = ScriptedApi::with_cities(true, Vec::new());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api.clone());

    let err = coordinator.refresh().await.unwrap_err();
    assert_eq!(
        err.update_failure_kind(),
        Some(UpdateFailureKind::NoCityAvailable)
    );
    let message = err.to_string();
    assert!(message.starts_with("No city available and location resolution failed"));
    assert!(message.contains("geo lookup down"), "{message}");
    assert!(
        coordinator
            .last_error()
            .is_some_and(|last| last.contains("geo lookup down"))
    );
    assert_eq!(coordinator.state(), CoordinatorState::Failed);
    assert!(!coordinator.last_update_success());
    assert!(coordinator.snapshot().is_none());
    assert_eq!(api.city_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn auto_city_is_pinned_after_first_success() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api.clone());

    assert_ok!(coordinator.refresh().await);
    assert_ok!(coordinator.refresh().await);

    assert_eq!(api.resolve_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.city_calls.load(Ordering::SeqCst), 2);
    assert_eq!(coordinator.snapshot().unwrap().city_id, "c47717");
}

#[tokio::test]
async fn fixed_city_skips_resolution() {
    let api = ScriptedApi::with_cities(false, paris());
    let mut cfg = config(CitySelection::Fixed("c51381".into()));
    cfg.city_name = Some("London".into());
    cfg.currency = Currency::Gbp;
    let coordinator = Coordinator::with_api(cfg, api.clone());

    let snapshot = coordinator.refresh().await.unwrap();
    assert_eq!(snapshot.city_id, "c51381");
    assert_eq!(snapshot.city_name, "London");
    assert_eq!(snapshot.currency, Currency::Gbp);
    assert_eq!(snapshot.events.currency, "GBP");
    assert_eq!(api.resolve_calls.load(Ordering::SeqCst), 0);
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api.clone());
    let first = coordinator.refresh().await.unwrap();

    api.events_fail.store(true, Ordering::SeqCst);
    let err = coordinator.refresh().await.unwrap_err();

    assert_eq!(
        err.update_failure_kind(),
        Some(UpdateFailureKind::Communication)
    );
    assert_eq!(
        coordinator.last_error().as_deref(),
        Some("Error communicating with API: HTTP 503")
    );
    assert!(!coordinator.last_update_success());
    assert_eq!(coordinator.snapshot().unwrap().fetched_at, first.fetched_at);
    assert!(!coordinator.sensor(SensorKind::Today).available);

    api.events_fail.store(false, Ordering::SeqCst);
    assert_ok!(coordinator.refresh().await);
    assert!(coordinator.last_error().is_none());
    assert_eq!(coordinator.state(), CoordinatorState::Ready);
}

#[tokio::test]
async fn start_fails_when_first_refresh_fails() {
    let api = ScriptedApi::with_cities(true, Vec::new());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api);

    assert_err!(coordinator.start().await);
    assert_ne!(coordinator.state(), CoordinatorState::Ready);
    coordinator.shutdown().await;
}

// ── Queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn date_query_needs_a_resolved_city() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api);
    let from = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 6, 7).unwrap();

    let err = coordinator
        .get_events_by_date(from, to, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::CityNotResolved));

    coordinator.refresh().await.unwrap();
    let resp = coordinator.get_events_by_date(from, to, None).await.unwrap();
    assert_eq!(resp.destination_title, "c47717");
}

#[tokio::test]
async fn date_query_rejects_inverted_range() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator =
        Coordinator::with_api(config(CitySelection::Fixed("c67097".into())), api);
    let from = NaiveDate::from_ymd_opt(2026, 6, 7).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

    let err = coordinator
        .get_events_by_date(from, to, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
}

#[tokio::test]
async fn fixed_city_date_query_works_before_refresh() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator =
        Coordinator::with_api(config(CitySelection::Fixed("c67097".into())), api);
    let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();

    let resp = coordinator.get_events_by_date(day, day, None).await.unwrap();
    assert_eq!(resp.destination_title, "c67097");
}

// ── Background refresh ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn periodic_task_refreshes_until_shutdown() {
    let api = ScriptedApi::with_cities(false, paris());
    let cfg = CoordinatorConfig {
        update_interval: Duration::from_secs(3600),
        ..config(CitySelection::Auto)
    };
    let coordinator = Coordinator::with_api(cfg, api.clone());
    let mut updates = coordinator.subscribe();

    coordinator.start().await.unwrap();
    assert_eq!(api.city_calls.load(Ordering::SeqCst), 1);
    updates.changed().await.unwrap();

    tokio::time::sleep(Duration::from_secs(3601)).await;
    updates.changed().await.unwrap();
    assert_eq!(api.city_calls.load(Ordering::SeqCst), 2);

    coordinator.shutdown().await;
    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(api.city_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn snapshot_stream_yields_each_refresh() {
    let api = ScriptedApi::with_cities(false, paris());
    let coordinator = Coordinator::with_api(config(CitySelection::Auto), api);
    let mut stream = coordinator.subscribe().into_stream();

    coordinator.refresh().await.unwrap();
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.city_id, "c47717");

    coordinator.refresh().await.unwrap();
    let second = stream.next().await.unwrap().unwrap();
    assert!(second.fetched_at >= first.fetched_at);
}

#[tokio::test]
async fn oneshot_runs_against_sample_data() {
    let title = Coordinator::oneshot(CoordinatorConfig::default(), |coordinator| async move {
        let snapshot = coordinator.snapshot().ok_or(CoreError::NoData)?;
        Ok::<_, CoreError>(snapshot.events.destination_title.clone())
    })
    .await
    .unwrap();
    assert_eq!(title, "Bucharest");
}

// ── Services over the sample client ─────────────────────────────────

fn sample_coordinator() -> Coordinator {
    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    Coordinator::with_api(
        config(CitySelection::Auto),
        Arc::new(SampleClient::with_today(today)),
    )
}

#[tokio::test]
async fn booking_service_needs_data_then_finds_event() {
    let coordinator = sample_coordinator();
    let registry = ServiceRegistry::with_default_services();

    let resp = registry
        .call("generate_booking_url", &coordinator, json!({"event_id": 976227}))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("No event data available"));

    registry
        .call("refresh_events", &coordinator, json!({}))
        .await;

    let resp = registry
        .call(
            "generate_booking_url",
            &coordinator,
            json!({"event_id": 976227, "date": "2026-09-02", "currency": "RON"}),
        )
        .await;
    assert!(resp.success);
    assert_eq!(resp.payload["event_title"], "Palace of the Parliament Tour");
    assert_eq!(resp.payload["event_id"], 976_227);
    let url = resp.payload["booking_url"].as_str().unwrap();
    assert!(url.contains("currency=RON"));
    assert!(url.contains("selected_date=2026-09-02"));

    let resp = registry
        .call("generate_booking_url", &coordinator, json!({"event_id": 42}))
        .await;
    assert_eq!(resp.error.as_deref(), Some("Event ID 42 not found"));
}

#[tokio::test]
async fn search_and_date_services_return_results() {
    let coordinator = sample_coordinator();
    let registry = ServiceRegistry::with_default_services();
    coordinator.refresh().await.unwrap();

    let resp = registry
        .call("search_events", &coordinator, json!({"query": "museum"}))
        .await;
    assert!(resp.success);
    assert_eq!(resp.payload["results"]["location_type"], "search");
    assert_eq!(resp.payload["results"]["currency"], "EUR");

    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    let resp = registry
        .call(
            "get_events_by_date",
            &coordinator,
            json!({"date_from": tomorrow, "date_to": tomorrow}),
        )
        .await;
    assert!(resp.success);
    assert_eq!(resp.payload["results"]["destination_title"], "Bucharest");
    assert_eq!(resp.payload["results"]["events"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn unknown_service_fails_softly() {
    let coordinator = sample_coordinator();
    let resp = ServiceRegistry::with_default_services()
        .call("launch_rockets", &coordinator, json!({}))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Validation failed: Unknown service: launch_rockets"));
}

#[tokio::test]
async fn projections_follow_the_snapshot() {
    let coordinator = sample_coordinator();
    assert!(coordinator.calendar().is_empty());
    assert!(!coordinator.sensor(SensorKind::Nearby).available);

    coordinator.refresh().await.unwrap();

    let sensor = coordinator.sensor(SensorKind::Nearby);
    assert!(sensor.available);
    assert_eq!(sensor.value, 8);

    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let calendar = coordinator.calendar_at(today);
    assert_eq!(calendar.entries().len(), 8);
    assert_eq!(calendar.entries()[0].uid, "976227_2026-09-01");
}
