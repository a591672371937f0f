//! Command dispatch: bridges CLI args -> coordinator calls -> output formatting.

pub mod booking;
pub mod calendar;
pub mod cities;
pub mod config_cmd;
pub mod events;
pub mod location;
pub mod refresh;
pub mod search;
pub mod sensor;
pub mod services;
pub mod util;

use tickets_core::{Coordinator, ServiceRegistry};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a coordinator-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    registry: &ServiceRegistry,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Events(args) => events::handle(coordinator, args, global).await,
        Command::Cities => cities::handle(coordinator, global).await,
        Command::Location(args) => location::handle(coordinator, args, global).await,
        Command::Search(args) => search::handle_search(coordinator, registry, args, global).await,
        Command::Dates(args) => search::handle_dates(coordinator, registry, args, global).await,
        Command::Nearby(args) => search::handle_nearby(coordinator, args, global).await,
        Command::BookingUrl(args) => booking::handle(coordinator, registry, args, global).await,
        Command::Refresh => refresh::handle(coordinator, registry, global).await,
        Command::Calendar(args) => calendar::handle(coordinator, args, global).await,
        Command::Sensor(args) => sensor::handle(coordinator, args, global).await,
        Command::Call(args) => services::handle_call(coordinator, registry, args, global).await,
        // Handled before a coordinator is built
        Command::Services | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
