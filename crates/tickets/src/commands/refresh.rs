//! Refresh handler.

use serde::Serialize;
use serde_json::json;
use tickets_core::{Coordinator, ServiceRegistry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct RefreshSummary {
    city_id: String,
    city_name: String,
    currency: String,
    events: usize,
    fetched_at: String,
    mode: &'static str,
}

fn detail(s: &RefreshSummary) -> String {
    [
        format!("City:     {} ({})", s.city_name, s.city_id),
        format!("Events:   {}", s.events),
        format!("Currency: {}", s.currency),
        format!("Fetched:  {}", s.fetched_at),
        format!("Source:   {}", s.mode),
    ]
    .join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = tickets_core::command::SERVICE_REFRESH_EVENTS;
    util::run_service(registry, coordinator, service, json!({})).await?;

    let snapshot = coordinator.snapshot().ok_or_else(|| CliError::NoData {
        message: "No event data available".into(),
    })?;
    let summary = RefreshSummary {
        city_id: snapshot.city_id.clone(),
        city_name: snapshot.city_name.clone(),
        currency: snapshot.currency.to_string(),
        events: snapshot.events.events.len(),
        fetched_at: snapshot.fetched_at.to_rfc3339(),
        mode: coordinator.api().mode(),
    };

    let out = output::render_single(&global.output, &summary, detail, |s| s.city_id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
