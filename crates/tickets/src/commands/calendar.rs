//! Calendar projection handler.

use chrono::{Local, NaiveDate, NaiveTime};
use tabled::Tabled;
use tickets_core::{CalendarEntry, Coordinator};

use crate::cli::{CalendarArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Event")]
    summary: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&CalendarEntry> for EntryRow {
    fn from(e: &CalendarEntry) -> Self {
        Self {
            start: e.start.format("%Y-%m-%d %H:%M").to_string(),
            end: e.end.format("%H:%M").to_string(),
            summary: e.summary.clone(),
            location: e.location.clone(),
        }
    }
}

pub async fn handle(
    coordinator: &Coordinator,
    args: CalendarArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let from = args.from.as_deref().map(|d| util::parse_date("from", d)).transpose()?;
    let to = args.to.as_deref().map(|d| util::parse_date("to", d)).transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(CliError::Validation {
                field: "from".into(),
                reason: format!("{from} is after {to}"),
            });
        }
    }

    util::ensure_snapshot(coordinator, global).await?;
    let calendar = coordinator.calendar();

    let entries: Vec<CalendarEntry> = if args.next {
        calendar
            .next_event(Local::now().naive_local())
            .into_iter()
            .cloned()
            .collect()
    } else {
        let start = from.map_or(chrono::NaiveDateTime::MIN, |d| d.and_time(NaiveTime::MIN));
        let end = to
            .and_then(|d| d.succ_opt())
            .map_or(chrono::NaiveDateTime::MAX, |d: NaiveDate| d.and_time(NaiveTime::MIN));
        calendar
            .events_in_range(start, end)
            .into_iter()
            .cloned()
            .collect()
    };

    let out = output::render_list(&global.output, &entries, |e| EntryRow::from(e), |e| e.uid.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
