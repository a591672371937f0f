//! Config subcommand handlers.

use dialoguer::{Input, Select};
use strum::IntoEnumIterator;
use tickets_core::Currency;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: "must be 'true' or 'false'".into(),
    })
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be a non-negative number, got '{value}'"),
    })
}

/// Apply `key = value` to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "city_id" | "city-id" | "city" => profile.city_id = value,
        "city_name" | "city-name" => profile.city_name = Some(value),
        "currency" => {
            config::parse_currency(&value)?;
            profile.currency = value.trim().to_uppercase();
        }
        "use_sample_data" | "use-sample-data" | "sample" => {
            profile.use_sample_data = parse_bool(key, &value)?;
        }
        "base_url" | "base-url" => {
            url::Url::parse(&value).map_err(|_| CliError::Validation {
                field: "base_url".into(),
                reason: format!("invalid URL: {value}"),
            })?;
            profile.base_url = Some(value);
        }
        "timeout" => profile.timeout = Some(parse_number(key, &value)?),
        "update_interval_hours" | "update-interval-hours" => {
            profile.update_interval_hours = parse_number(key, &value)?;
        }
        "rate_limit_calls" | "rate-limit-calls" => {
            profile.rate_limit_calls = parse_number(key, &value)?;
        }
        "rate_limit_period" | "rate-limit-period" => {
            profile.rate_limit_period = parse_number(key, &value)?;
        }
        "event_limit" | "event-limit" => profile.event_limit = parse_number(key, &value)?,
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: city_id, city_name, currency, \
                     use_sample_data, base_url, timeout, update_interval_hours, \
                     rate_limit_calls, rate_limit_period, event_limit"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("tickets: configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            if config_path.exists()
                && !util::confirm("A config file already exists. Overwrite it?")?
            {
                return Ok(());
            }

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let city_id: String = Input::new()
                .with_prompt("City id (\"auto\" to detect from your location)")
                .default(tickets_core::AUTO_CITY.into())
                .interact_text()
                .map_err(prompt_err)?;

            let city_name: String = Input::new()
                .with_prompt("City display name (optional)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let currencies: Vec<Currency> = Currency::iter().collect();
            let currency_idx = Select::new()
                .with_prompt("Currency")
                .items(&currencies)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let source = Select::new()
                .with_prompt("Data source")
                .items(&["Sample data (offline)", "Live events backend"])
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let profile = Profile {
                city_id,
                city_name: Some(city_name).filter(|n| !n.trim().is_empty()),
                currency: currencies
                    .get(currency_idx)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                use_sample_data: source == 0,
                ..Profile::default()
            };

            let mut cfg = Config {
                default_profile: Some(profile_name.clone()),
                ..Config::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);

            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: tickets events");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_file()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.active_profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: tickets config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_file()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}
