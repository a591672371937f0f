//! Booking link handler.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use tickets_core::{CommandResult, Coordinator, Language, ServiceRegistry, generate_qr_code};

use crate::cli::{BookingUrlArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct BookingLink {
    event_id: u64,
    event_title: String,
    booking_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    qr_code_data: Option<String>,
}

fn detail(b: &BookingLink) -> String {
    let mut lines = vec![
        format!("Event: {} ({})", b.event_title, b.event_id),
        format!("URL:   {}", b.booking_url),
    ];
    if let Some(ref qr) = b.qr_code_data {
        lines.push(format!("QR:    {qr}"));
    }
    lines.join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    args: BookingUrlArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref raw) = args.date {
        util::parse_date("date", raw)?;
    }
    let language = args
        .language
        .as_deref()
        .map(|code| {
            code.trim()
                .to_lowercase()
                .parse::<Language>()
                .map_err(|_| CliError::Validation {
                    field: "language".into(),
                    reason: format!("unsupported language code: {code}"),
                })
        })
        .transpose()?;
    let tickets = args
        .tickets
        .iter()
        .map(|raw| util::parse_ticket(raw))
        .collect::<Result<IndexMap<_, _>, _>>()?;

    util::ensure_snapshot(coordinator, global).await?;

    let payload = json!({
        "event_id": args.event_id,
        "date": args.date,
        "timeslot": args.timeslot,
        "tickets": tickets,
        "language": language,
    });
    let service = tickets_core::command::SERVICE_GENERATE_BOOKING_URL;
    let link = match util::run_service(registry, coordinator, service, payload).await? {
        CommandResult::BookingUrl {
            booking_url,
            event_title,
            event_id,
        } => BookingLink {
            qr_code_data: args.qr.then(|| generate_qr_code(&booking_url)),
            event_id,
            event_title,
            booking_url,
        },
        other => {
            return Err(CliError::ServiceFailed {
                service: service.into(),
                message: format!("unexpected result: {other:?}"),
            });
        }
    };

    let out = output::render_single(&global.output, &link, detail, |b| b.booking_url.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
