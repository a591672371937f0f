//! Query handlers: free-text search, date range, and nearby.
//!
//! Search and date range go through the service registry so their payloads
//! get the same validation as any other caller's.

use serde_json::json;
use tickets_core::{CitySelection, CommandResult, Coordinator, EventsResponse, ServiceRegistry};

use crate::cli::{DatesArgs, GlobalOpts, NearbyArgs, SearchArgs};
use crate::error::CliError;

use super::{events, util};

fn expect_events(service: &str, result: CommandResult) -> Result<EventsResponse, CliError> {
    match result {
        CommandResult::Events(resp) => Ok(resp),
        other => Err(CliError::ServiceFailed {
            service: service.into(),
            message: format!("unexpected result: {other:?}"),
        }),
    }
}

pub async fn handle_search(
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = tickets_core::command::SERVICE_SEARCH_EVENTS;
    let result = util::run_service(registry, coordinator, service, json!({ "query": args.query }))
        .await?;
    events::print_response(&expect_events(service, result)?, global);
    Ok(())
}

pub async fn handle_dates(
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    args: DatesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let from = util::parse_date("from", &args.from)?;
    let to = match args.to.as_deref() {
        Some(raw) => util::parse_date("to", raw)?,
        None => from,
    };

    // `auto` needs a resolved city, which only a refresh provides.
    if coordinator.config().city == CitySelection::Auto {
        util::ensure_snapshot(coordinator, global).await?;
    }

    let service = tickets_core::command::SERVICE_GET_EVENTS_BY_DATE;
    let payload = json!({ "date_from": from, "date_to": to });
    let result = util::run_service(registry, coordinator, service, payload).await?;
    events::print_response(&expect_events(service, result)?, global);
    Ok(())
}

pub async fn handle_nearby(
    coordinator: &Coordinator,
    args: NearbyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !(-90.0..=90.0).contains(&args.lat) || !(-180.0..=180.0).contains(&args.lon) {
        return Err(CliError::Validation {
            field: "coordinates".into(),
            reason: format!("{}, {} is not a valid position", args.lat, args.lon),
        });
    }

    let resp = coordinator
        .get_nearby_events(args.lat, args.lon, args.radius)
        .await?;
    events::print_response(&resp, global);
    Ok(())
}
