//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use tickets_core::{CommandResult, Coordinator, CoordinatorSnapshot, ServiceRegistry};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Run a refresh, with a spinner on interactive table output.
pub async fn ensure_snapshot(
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<Arc<CoordinatorSnapshot>, CliError> {
    let spinner = (global.output == OutputFormat::Table
        && !global.quiet
        && std::io::stderr().is_terminal())
    .then(|| spinner("Fetching events..."));

    let result = coordinator.refresh().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(result?)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Validate `payload` through the service registry and execute it.
///
/// Keeps the typed error, unlike `ServiceRegistry::call`.
pub async fn run_service(
    registry: &ServiceRegistry,
    coordinator: &Coordinator,
    service: &str,
    payload: Value,
) -> Result<CommandResult, CliError> {
    let cmd = registry.command(service, payload)?;
    tracing::debug!(service, "dispatching service");
    Ok(coordinator.execute(cmd).await?)
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

/// Parse a `VARIANT=QTY` ticket argument.
pub fn parse_ticket(raw: &str) -> Result<(String, u32), CliError> {
    let invalid = || CliError::Validation {
        field: "ticket".into(),
        reason: format!("expected VARIANT=QTY, got '{raw}'"),
    };

    let (variant, qty) = raw.split_once('=').ok_or_else(invalid)?;
    let variant = variant.trim();
    if variant.is_empty() {
        return Err(invalid());
    }
    let qty: u32 = qty.trim().parse().map_err(|_| invalid())?;
    Ok((variant.to_owned(), qty))
}

/// Prompt for confirmation.
pub fn confirm(message: &str) -> Result<bool, CliError> {
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Validation {
            field: "interactive".into(),
            reason: format!("prompt failed: {e}"),
        })
}
