//! Location resolution handler.

use tickets_core::{Coordinator, ResolvedLocation};

use crate::cli::{GlobalOpts, LocationArgs};
use crate::error::CliError;
use crate::output;

fn detail(l: &ResolvedLocation) -> String {
    [
        format!("City:     {} ({})", l.city_name, l.city_id),
        format!("Country:  {} ({})", l.country, l.country_code),
        format!("Position: {:.4}, {:.4}", l.latitude, l.longitude),
        format!("Source:   {}", l.detected_from),
    ]
    .join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    args: LocationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let location = coordinator.resolve_location(args.ip.as_deref()).await?;
    let out = output::render_single(&global.output, &location, detail, |l| l.city_id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
