//! Event listing handlers and the shared event table.

use tabled::Tabled;
use tickets_core::{Coordinator, Event, EventsResponse, format_price, process_event_data};

use crate::cli::{EventsArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Dates")]
    dates: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        let dates = e.listed_dates();
        Self {
            id: e.id,
            title: e.title.clone(),
            kind: e.kind.replace('_', " "),
            price: if e.price > 0.0 {
                format_price(e.price, &e.currency)
            } else {
                "free".into()
            },
            rating: if e.rating > 0.0 {
                format!("{:.1} ({})", e.rating, e.rating_count)
            } else {
                "-".into()
            },
            dates: if dates.is_empty() {
                "-".into()
            } else {
                dates.join(", ")
            },
        }
    }
}

/// Render a response in the selected format.
///
/// Structured formats emit the whole response; table and plain list events.
pub fn render_response(resp: &EventsResponse, global: &GlobalOpts) -> String {
    match global.output {
        OutputFormat::Table | OutputFormat::Plain => output::render_list(
            &global.output,
            &resp.events,
            |e| EventRow::from(e),
            |e| e.id.to_string(),
        ),
        _ => output::render_single(&global.output, resp, |_| String::new(), |_| String::new()),
    }
}

fn summary_line(resp: &EventsResponse, global: &GlobalOpts) -> Option<String> {
    (global.output == OutputFormat::Table).then(|| {
        format!(
            "{}: {} event(s) in {}",
            output::heading(&resp.destination_title, output::should_color(&global.color)),
            resp.total_count,
            resp.currency
        )
    })
}

/// Print a response with a heading line in table mode.
pub fn print_response(resp: &EventsResponse, global: &GlobalOpts) {
    if let Some(line) = summary_line(resp, global) {
        output::print_output(&line, global.quiet);
    }
    output::print_output(&render_response(resp, global), global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    coordinator: &Coordinator,
    args: EventsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = util::ensure_snapshot(coordinator, global).await?;

    if args.enriched && !matches!(global.output, OutputFormat::Table | OutputFormat::Plain) {
        let enriched: Vec<_> = snapshot
            .events
            .events
            .iter()
            .map(|e| process_event_data(e, snapshot.currency))
            .collect();
        let out = output::render_single(&global.output, &enriched, |_| String::new(), |_| {
            String::new()
        });
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    print_response(&snapshot.events, global);
    Ok(())
}
