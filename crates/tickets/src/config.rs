//! CLI configuration: thin wrapper around `tickets_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--city, --currency, --sample, ...).

use std::time::Duration;

use tickets_core::{CitySelection, CoordinatorConfig, Currency};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tickets_config::{
    Config, Profile, config_path, load_config, load_config_file, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Comma-separated profile names for error help.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build a `CoordinatorConfig` from the config file, the active profile,
/// and CLI overrides.
///
/// Flags take priority over the profile. The CLI never runs a background
/// refresh, so the update interval is zeroed.
pub fn resolve_coordinator_config(global: &GlobalOpts) -> Result<CoordinatorConfig, CliError> {
    let cfg = load_config()?;
    let (_, profile) = cfg
        .profile(global.profile.as_deref())
        .map_err(|_| CliError::ProfileNotFound {
            name: active_profile_name(global, &cfg),
            available: available_profiles(&cfg),
        })?;

    let mut resolved = tickets_config::profile_to_coordinator_config(&profile, &cfg.defaults)?;
    apply_overrides(&mut resolved, global)?;
    resolved.update_interval = Duration::ZERO;
    Ok(resolved)
}

fn apply_overrides(config: &mut CoordinatorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref city) = global.city {
        let Ok(selection) = city.parse::<CitySelection>();
        if selection != config.city {
            // The profile's display name belongs to the profile's city.
            config.city_name = None;
        }
        config.city = selection;
    }

    if let Some(ref code) = global.currency {
        config.currency = parse_currency(code)?;
    }

    if global.sample {
        config.use_sample_data = true;
    } else if global.live {
        config.use_sample_data = false;
    }

    if let Some(ref raw) = global.base_url {
        config.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        config.timeout = Duration::from_secs(secs);
    }

    if let Some(limit) = global.limit {
        if limit == 0 {
            return Err(CliError::Validation {
                field: "limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        config.event_limit = limit;
    }

    Ok(())
}

/// Parse a currency code case-insensitively.
pub fn parse_currency(code: &str) -> Result<Currency, CliError> {
    code.trim().parse().map_err(|_| CliError::Validation {
        field: "currency".into(),
        reason: format!("unsupported currency code: {code}"),
    })
}
