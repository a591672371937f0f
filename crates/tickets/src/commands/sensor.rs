//! Sensor projection handler.

use tickets_core::{Coordinator, SensorKind, SensorState};

use crate::cli::{GlobalOpts, SensorArgs, SensorChoice};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &SensorState, color: bool) -> String {
    let mut lines = vec![
        output::heading(s.kind.display_name(), color),
        format!("Available: {}", output::yes_no(s.available, color)),
        format!("Events:    {}", s.value),
    ];
    if let Some(ref attrs) = s.attributes {
        lines.push(format!("Title:     {}", attrs.destination_title));
        lines.push(format!("Type:      {}", attrs.location_type));
        lines.push(format!("Currency:  {}", attrs.currency));
        lines.push(format!("Updated:   {}", attrs.last_updated.to_rfc3339()));
        for event in attrs.events.iter().take(5) {
            lines.push(format!("  - {}", event.event.title));
        }
        if attrs.events.len() > 5 {
            lines.push(format!("  ... and {} more", attrs.events.len() - 5));
        }
    }
    lines.join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    args: SensorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = match args.kind {
        SensorChoice::Today => SensorKind::Today,
        SensorChoice::Nearby => SensorKind::Nearby,
    };

    // A failed refresh still yields a sensor, marked unavailable.
    if let Err(e) = util::ensure_snapshot(coordinator, global).await {
        tracing::warn!(error = %e, "refresh failed, showing last known state");
    }

    let state = coordinator.sensor(kind);
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &state,
        |s| detail(s, color),
        |s| s.value.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
