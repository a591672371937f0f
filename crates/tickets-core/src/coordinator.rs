// ── Coordinator ──
//
// Owns one events client and keeps a periodically refreshed snapshot of the
// configured city's listings. Handles city resolution, background refresh,
// command routing, and snapshot subscriptions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{Local, NaiveDate, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use tickets_api::{
    City, Currency, DEFAULT_RADIUS_KM, EventsApi, EventsResponse, LiveClient, RateLimiter,
    ResolvedLocation, SampleClient, TransportConfig,
};

use crate::booking::{BookingParams, generate_booking_url};
use crate::calendar::EventCalendar;
use crate::command::{BookingUrlRequest, Command, CommandResult};
use crate::config::{CitySelection, CoordinatorConfig};
use crate::error::{CoreError, UpdateFailureKind};
use crate::sensor::{SensorKind, SensorState};
use crate::store::{CoordinatorSnapshot, SnapshotStore, SnapshotStream};

const UNKNOWN_CITY: &str = "Unknown";

// ── CoordinatorState ─────────────────────────────────────────────

/// Refresh state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CoordinatorState {
    Uninitialized,
    Refreshing,
    Ready,
    Failed,
}

// ── Coordinator ──────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: CoordinatorConfig,
    api: Arc<dyn EventsApi>,
    store: SnapshotStore,
    state: watch::Sender<CoordinatorState>,
    last_update_success: AtomicBool,
    last_error: ArcSwapOption<String>,
    /// Serialises refreshes.
    refresh_lock: Mutex<()>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create a coordinator with the client selected by
    /// `config.use_sample_data`. Does NOT fetch anything; call
    /// [`start()`](Self::start) or [`refresh()`](Self::refresh).
    pub fn new(config: CoordinatorConfig) -> Result<Self, CoreError> {
        let api: Arc<dyn EventsApi> = if config.use_sample_data {
            info!("using sample data");
            Arc::new(SampleClient::new())
        } else {
            let transport = TransportConfig::with_timeout(config.timeout);
            let client = LiveClient::new(config.base_url.clone(), &transport)?.with_rate_limiter(
                RateLimiter::new(config.rate_limit_calls, config.rate_limit_period),
            );
            Arc::new(client)
        };
        Ok(Self::with_api(config, api))
    }

    /// Create a coordinator around an existing client.
    pub fn with_api(config: CoordinatorConfig, api: Arc<dyn EventsApi>) -> Self {
        let (state, _) = watch::channel(CoordinatorState::Uninitialized);
        Self {
            inner: Arc::new(CoordinatorInner {
                config,
                api,
                store: SnapshotStore::new(),
                state,
                last_update_success: AtomicBool::new(false),
                last_error: ArcSwapOption::const_empty(),
                refresh_lock: Mutex::new(()),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// The underlying client.
    pub fn api(&self) -> &Arc<dyn EventsApi> {
        &self.inner.api
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Perform the first refresh, then spawn the periodic refresh task.
    ///
    /// A failed first refresh is returned and no task is spawned.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.refresh().await?;

        let interval = self.inner.config.update_interval;
        let mut handles = self.inner.task_handles.lock().await;
        if interval > Duration::ZERO && handles.is_empty() {
            let coordinator = self.clone();
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(refresh_task(coordinator, interval, cancel)));
        }

        info!(mode = self.inner.api.mode(), "coordinator started");
        Ok(())
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("coordinator stopped");
    }

    /// One-shot: refresh once, run closure, shut down.
    ///
    /// Disables the periodic refresh since only a single cycle is needed.
    pub async fn oneshot<F, Fut, T>(config: CoordinatorConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.update_interval = Duration::ZERO;

        let coordinator = Coordinator::new(cfg)?;
        coordinator.start().await?;
        let result = f(coordinator.clone()).await;
        coordinator.shutdown().await;
        result
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Fetch the configured city's events and replace the snapshot.
    ///
    /// Every failure is reported as [`CoreError::UpdateFailed`]; the
    /// previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<CoordinatorSnapshot>, CoreError> {
        let _guard = self.inner.refresh_lock.lock().await;
        self.inner.state.send_replace(CoordinatorState::Refreshing);

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let snapshot = self.inner.store.replace(snapshot);
                self.inner.last_update_success.store(true, Ordering::Release);
                self.inner.last_error.store(None);
                self.inner.state.send_replace(CoordinatorState::Ready);
                info!(
                    city_id = %snapshot.city_id,
                    events = snapshot.events.events.len(),
                    "refresh complete"
                );
                Ok(snapshot)
            }
            Err(e) => {
                let e = e.into_update_failed();
                self.inner.last_update_success.store(false, Ordering::Release);
                self.inner.last_error.store(Some(Arc::new(e.to_string())));
                self.inner.state.send_replace(CoordinatorState::Failed);
                warn!(error = %e, "refresh failed");
                Err(e)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<CoordinatorSnapshot, CoreError> {
        let config = &self.inner.config;
        let (city_id, city_name) = self.resolve_city().await?;

        let events = self
            .inner
            .api
            .get_events_by_city(&city_id, config.currency, config.event_limit)
            .await?;

        Ok(CoordinatorSnapshot {
            city_id,
            city_name,
            currency: config.currency,
            events,
            fetched_at: Utc::now(),
        })
    }

    /// City id and display name for the next refresh.
    ///
    /// An `auto` city is resolved once and then pinned to the city of the
    /// current snapshot. When location resolution fails the first listed
    /// city is used.
    async fn resolve_city(&self) -> Result<(String, String), CoreError> {
        let config = &self.inner.config;

        if let CitySelection::Fixed(id) = &config.city {
            let name = config
                .city_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CITY.to_owned());
            return Ok((id.clone(), name));
        }

        if let Some(snapshot) = self.inner.store.load() {
            return Ok((snapshot.city_id.clone(), snapshot.city_name.clone()));
        }

        match self.inner.api.resolve_location(None).await {
            Ok(location) => {
                let name = if location.city_name.is_empty() {
                    UNKNOWN_CITY.to_owned()
                } else {
                    location.city_name
                };
                debug!(city_id = %location.city_id, city = %name, "resolved location");
                Ok((location.city_id, name))
            }
            Err(e) => {
                warn!(error = %e, "could not resolve location, using first known city");
                let first = self.inner.api.get_cities().await.into_iter().next();
                first
                    .map(|city| (city.id, city.name))
                    .ok_or_else(|| CoreError::UpdateFailed {
                        kind: UpdateFailureKind::NoCityAvailable,
                        message: e.to_string(),
                    })
            }
        }
    }

    // ── State observation ────────────────────────────────────────

    pub fn state(&self) -> CoordinatorState {
        *self.inner.state.borrow()
    }

    /// Whether the most recent refresh succeeded.
    pub fn last_update_success(&self) -> bool {
        self.inner.last_update_success.load(Ordering::Acquire)
    }

    /// Message of the most recent refresh failure, cleared on success.
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error.load_full().map(|e| (*e).clone())
    }

    /// The latest snapshot, if any refresh has succeeded.
    pub fn snapshot(&self) -> Option<Arc<CoordinatorSnapshot>> {
        self.inner.store.load()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> SnapshotStream {
        self.inner.store.subscribe()
    }

    // ── Projections ──────────────────────────────────────────────

    /// Calendar entries of the current snapshot, undated events on today.
    pub fn calendar(&self) -> EventCalendar {
        self.calendar_at(Local::now().date_naive())
    }

    pub fn calendar_at(&self, today: NaiveDate) -> EventCalendar {
        self.snapshot()
            .map(|s| EventCalendar::build(&s.events, today))
            .unwrap_or_default()
    }

    pub fn sensor(&self, kind: SensorKind) -> SensorState {
        SensorState::project(kind, self.last_update_success(), self.snapshot().as_deref())
    }

    // ── Queries ──────────────────────────────────────────────────

    pub async fn search_events(
        &self,
        query: &str,
        currency: Option<Currency>,
    ) -> Result<EventsResponse, CoreError> {
        let config = &self.inner.config;
        let currency = currency.unwrap_or(config.currency);

        self.inner
            .api
            .search_events(query, currency, config.event_limit)
            .await
            .map_err(|e| {
                error!(error = %e, "error searching events");
                e.into()
            })
    }

    /// Events of the tracked city within `[date_from, date_to]`.
    ///
    /// Needs a concrete city: the configured one, or for `auto` the city
    /// of the current snapshot.
    pub async fn get_events_by_date(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        currency: Option<Currency>,
    ) -> Result<EventsResponse, CoreError> {
        if date_from > date_to {
            return Err(CoreError::Validation {
                message: format!("date_from {date_from} is after date_to {date_to}"),
            });
        }

        let config = &self.inner.config;
        let city_id = match config.city.city_id() {
            Some(id) => id.to_owned(),
            None => self
                .inner
                .store
                .city_id()
                .ok_or(CoreError::CityNotResolved)?,
        };
        let currency = currency.unwrap_or(config.currency);

        self.inner
            .api
            .get_events_by_date(&city_id, date_from, date_to, currency, config.event_limit)
            .await
            .map_err(|e| {
                error!(error = %e, "error fetching events by date");
                e.into()
            })
    }

    pub async fn get_cities(&self) -> Vec<City> {
        self.inner.api.get_cities().await
    }

    pub async fn resolve_location(
        &self,
        ip_address: Option<&str>,
    ) -> Result<ResolvedLocation, CoreError> {
        Ok(self.inner.api.resolve_location(ip_address).await?)
    }

    pub async fn get_nearby_events(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<u32>,
    ) -> Result<EventsResponse, CoreError> {
        let config = &self.inner.config;
        Ok(self
            .inner
            .api
            .get_nearby_events(
                latitude,
                longitude,
                config.currency,
                radius_km.unwrap_or(DEFAULT_RADIUS_KM),
                config.event_limit,
            )
            .await?)
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against this coordinator.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(command = cmd.name(), "executing command");
        route_command(self, cmd).await
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically refresh the snapshot.
async fn refresh_task(coordinator: Coordinator, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                // Failures are logged and recorded by refresh(); the next tick retries.
                let _ = coordinator.refresh().await;
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

async fn route_command(
    coordinator: &Coordinator,
    cmd: Command,
) -> Result<CommandResult, CoreError> {
    match cmd {
        Command::SearchEvents(req) => {
            let results = coordinator.search_events(&req.query, req.currency).await?;
            info!(count = results.events.len(), query = %req.query, "found events");
            Ok(CommandResult::Events(results))
        }

        Command::GetEventsByDate(req) => {
            let results = coordinator
                .get_events_by_date(req.date_from, req.date_to, req.currency)
                .await?;
            info!(count = results.events.len(), "found events in date range");
            Ok(CommandResult::Events(results))
        }

        Command::GenerateBookingUrl(req) => booking_url(coordinator, req),

        Command::RefreshEvents(req) => {
            debug!(sensor = req.sensor.as_deref().unwrap_or("all"), "refreshing events");
            coordinator.refresh().await?;
            Ok(CommandResult::Refreshed)
        }
    }
}

fn booking_url(
    coordinator: &Coordinator,
    req: BookingUrlRequest,
) -> Result<CommandResult, CoreError> {
    let snapshot = coordinator.snapshot().ok_or(CoreError::NoData)?;
    let event = snapshot
        .events
        .find(req.event_id)
        .ok_or(CoreError::EventNotFound { id: req.event_id })?;

    let params = BookingParams {
        currency: req.currency.unwrap_or(coordinator.config().currency),
        date: req.date,
        timeslot: req.timeslot,
        tickets: req.tickets,
        language: req.language,
        campaign_id: None,
        affiliate_source: None,
    };
    let booking_url = generate_booking_url(event, &params);
    info!(event = %event.title, "generated booking URL");

    Ok(CommandResult::BookingUrl {
        booking_url,
        event_title: event.title.clone(),
        event_id: event.id,
    })
}
