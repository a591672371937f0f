//! Service registry handlers: list names, call by name.

use serde_json::Value;
use tickets_core::{Coordinator, ServiceRegistry};

use crate::cli::{CallArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle_list(registry: &ServiceRegistry, global: &GlobalOpts) {
    let names: Vec<&str> = registry.names().collect();
    let out = output::render_single(
        &global.output,
        &names,
        |n| n.join("\n"),
        |n| n.join("\n"),
    );
    output::print_output(&out, global.quiet);
}

/// Run a service and print its `{success, ...}` response.
///
/// Services that need event data get a refresh first. A failed response is
/// printed, then reported as an error for the exit code.
pub async fn handle_call(
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    args: CallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let payload: Value = match args.payload.as_deref() {
        Some(raw) => serde_json::from_str(raw)?,
        None => Value::Null,
    };

    if args.service == tickets_core::command::SERVICE_GENERATE_BOOKING_URL
        || (args.service == tickets_core::command::SERVICE_GET_EVENTS_BY_DATE
            && coordinator.config().city.city_id().is_none())
    {
        // Refresh failures surface through the service response below.
        let _ = coordinator.refresh().await;
    }

    let resp = registry.call(&args.service, coordinator, payload).await;
    // Service responses have no table form.
    let format = match global.output {
        OutputFormat::Table => OutputFormat::Json,
        ref other => other.clone(),
    };
    let out = output::render_single(&format, &resp, |_| String::new(), |r| {
        r.success.to_string()
    });
    output::print_output(&out, global.quiet);

    match resp.error {
        None if resp.success => Ok(()),
        error => Err(CliError::ServiceFailed {
            service: args.service,
            message: error.unwrap_or_default(),
        }),
    }
}
