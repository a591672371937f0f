//! Shared configuration for the tickets CLI.
//!
//! TOML profiles merged with `TICKETS_*` environment overrides, and
//! translation to `tickets_core::CoordinatorConfig`. The CLI layers its
//! global flags on top of the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tickets_core::{CitySelection, CoordinatorConfig, Currency, config::default_base_url};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "TICKETS_CONFIG";

/// Profile used when neither the flag nor the file names one.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named tracking profiles.
    #[serde(default)]
    pub profiles: IndexMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: IndexMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up the active profile.
    ///
    /// A missing `"default"` profile resolves to [`Profile::default`], so a
    /// fresh install works without a config file. Any other missing name
    /// is an error.
    pub fn profile(&self, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = self.active_profile_name(requested);
        match self.profiles.get(name) {
            Some(profile) => Ok((name.to_owned(), profile.clone())),
            None if name == DEFAULT_PROFILE => Ok((name.to_owned(), Profile::default())),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }
}

/// Settings shared by every profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds, unless the profile sets one.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named tracking profile: which city, in which currency, from where.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend city id, or `"auto"` to resolve from the caller's location.
    #[serde(default = "default_city_id")]
    pub city_id: String,

    /// Display name for a fixed city.
    pub city_name: Option<String>,

    /// ISO currency code (case-insensitive).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Serve the bundled dataset instead of calling the backend.
    #[serde(default = "default_use_sample_data")]
    pub use_sample_data: bool,

    /// Backend root URL override.
    pub base_url: Option<String>,

    /// Override the global request timeout, in seconds.
    pub timeout: Option<u64>,

    #[serde(default = "default_update_interval_hours")]
    pub update_interval_hours: u64,

    #[serde(default = "default_rate_limit_calls")]
    pub rate_limit_calls: usize,

    /// Rate limit window, in seconds.
    #[serde(default = "default_rate_limit_period")]
    pub rate_limit_period: u64,

    #[serde(default = "default_event_limit")]
    pub event_limit: usize,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            city_id: default_city_id(),
            city_name: None,
            currency: default_currency(),
            use_sample_data: default_use_sample_data(),
            base_url: None,
            timeout: None,
            update_interval_hours: default_update_interval_hours(),
            rate_limit_calls: default_rate_limit_calls(),
            rate_limit_period: default_rate_limit_period(),
            event_limit: default_event_limit(),
        }
    }
}

fn default_city_id() -> String {
    tickets_core::AUTO_CITY.into()
}
fn default_currency() -> String {
    Currency::default().to_string()
}
fn default_use_sample_data() -> bool {
    true
}
fn default_update_interval_hours() -> u64 {
    24
}
fn default_rate_limit_calls() -> usize {
    20
}
fn default_rate_limit_period() -> u64 {
    60
}
fn default_event_limit() -> usize {
    50
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$TICKETS_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    ProjectDirs::from("io", "tickets-events", "tickets").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tickets");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file + environment. A missing file is not an error.
///
/// Environment keys use `__` between levels, e.g.
/// `TICKETS_PROFILES__HOME__CITY_ID=c67097`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TICKETS_").ignore(&["CONFIG"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the canonical config file alone, for commands that write it back.
pub fn load_config_file() -> Result<Config, ConfigError> {
    load_config_file_from(&config_path())
}

/// Load `path` without environment overrides, so saving the result never
/// persists a `TICKETS_*` variable. A missing file is not an error; a
/// malformed one is.
pub fn load_config_file_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `CoordinatorConfig` from a profile. No CLI flag overrides.
///
/// `defaults` supplies the timeout when the profile does not set one.
pub fn profile_to_coordinator_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CoordinatorConfig, ConfigError> {
    let currency: Currency = profile
        .currency
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "currency".into(),
            reason: format!("unsupported currency code: {}", profile.currency),
        })?;

    let base_url = match profile.base_url.as_deref() {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?,
        None => default_base_url(),
    };

    if profile.rate_limit_calls == 0 {
        return Err(ConfigError::Validation {
            field: "rate_limit_calls".into(),
            reason: "must be at least 1".into(),
        });
    }
    if profile.event_limit == 0 {
        return Err(ConfigError::Validation {
            field: "event_limit".into(),
            reason: "must be at least 1".into(),
        });
    }

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let update_interval = profile
        .update_interval_hours
        .checked_mul(60 * 60)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Validation {
            field: "update_interval_hours".into(),
            reason: format!("{} hours is out of range", profile.update_interval_hours),
        })?;

    let Ok(city) = profile.city_id.parse::<CitySelection>();

    Ok(CoordinatorConfig {
        city,
        city_name: profile.city_name.clone().filter(|n| !n.trim().is_empty()),
        currency,
        use_sample_data: profile.use_sample_data,
        base_url,
        timeout: Duration::from_secs(timeout),
        update_interval,
        rate_limit_calls: profile.rate_limit_calls,
        rate_limit_period: Duration::from_secs(profile.rate_limit_period),
        event_limit: profile.event_limit,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "paris"

[defaults]
timeout = 10

[profiles.paris]
city_id = "c67097"
city_name = "Paris"
currency = "usd"
use_sample_data = false

[profiles.roaming]
"#;

    #[test]
    fn loads_profiles_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();

            assert_eq!(cfg.default_profile.as_deref(), Some("paris"));
            assert_eq!(cfg.defaults.timeout, 10);
            assert_eq!(cfg.profiles.len(), 2);

            let roaming = &cfg.profiles["roaming"];
            assert_eq!(roaming, &Profile::default());
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("TICKETS_DEFAULT_PROFILE", "roaming");
            jail.set_env("TICKETS_PROFILES__PARIS__EVENT_LIMIT", "5");
            jail.set_env("TICKETS_CONFIG", "ignored.toml");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.default_profile.as_deref(), Some("roaming"));
            assert_eq!(cfg.profiles["paris"].event_limit, 5);
            assert_eq!(cfg.profiles["paris"].city_id, "c67097");
            Ok(())
        });
    }

    #[test]
    fn profile_lookup_falls_back_to_builtin_default() {
        let cfg = Config::default();
        let (name, profile) = cfg.profile(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile, Profile::default());

        assert!(matches!(
            cfg.profile(Some("work")),
            Err(ConfigError::UnknownProfile { name }) if name == "work"
        ));
    }

    #[test]
    fn translates_profile_to_coordinator_config() {
        let profile = Profile {
            city_id: "c67097".into(),
            city_name: Some("Paris".into()),
            currency: "usd".into(),
            use_sample_data: false,
            base_url: Some("http://localhost:8080/events".into()),
            update_interval_hours: 6,
            ..Profile::default()
        };
        let defaults = Defaults { timeout: 10 };

        let cfg = profile_to_coordinator_config(&profile, &defaults).unwrap();
        assert_eq!(cfg.city, CitySelection::Fixed("c67097".into()));
        assert_eq!(cfg.city_name.as_deref(), Some("Paris"));
        assert_eq!(cfg.currency, Currency::Usd);
        assert!(!cfg.use_sample_data);
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/events");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.update_interval, Duration::from_secs(6 * 3600));
        assert_eq!(cfg.rate_limit_period, Duration::from_secs(60));
    }

    #[test]
    fn default_profile_tracks_auto_city_with_sample_data() {
        let cfg = profile_to_coordinator_config(&Profile::default(), &Defaults::default()).unwrap();
        assert_eq!(cfg.city, CitySelection::Auto);
        assert_eq!(cfg.currency, Currency::Eur);
        assert!(cfg.use_sample_data);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.event_limit, 50);
    }

    #[test]
    fn rejects_invalid_profiles() {
        let defaults = Defaults::default();
        let cases = [
            (
                Profile {
                    currency: "XYZ".into(),
                    ..Profile::default()
                },
                "currency",
            ),
            (
                Profile {
                    base_url: Some("not a url".into()),
                    ..Profile::default()
                },
                "base_url",
            ),
            (
                Profile {
                    rate_limit_calls: 0,
                    ..Profile::default()
                },
                "rate_limit_calls",
            ),
            (
                Profile {
                    event_limit: 0,
                    ..Profile::default()
                },
                "event_limit",
            ),
            (
                Profile {
                    timeout: Some(0),
                    ..Profile::default()
                },
                "timeout",
            ),
            (
                Profile {
                    update_interval_hours: u64::MAX / 100,
                    ..Profile::default()
                },
                "update_interval_hours",
            ),
        ];

        for (profile, expected) in cases {
            match profile_to_coordinator_config(&profile, &defaults) {
                Err(ConfigError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_default_timeout_is_rejected() {
        let err = profile_to_coordinator_config(&Profile::default(), &Defaults { timeout: 0 })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "timeout"));

        // A profile value wins over the zero default.
        let profile = Profile {
            timeout: Some(5),
            ..Profile::default()
        };
        let cfg = profile_to_coordinator_config(&profile, &Defaults { timeout: 0 }).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn legacy_display_defaults_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[defaults]\noutput = \"json\"\ncolor = \"never\"\ntimeout = 7\n",
            )?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.defaults, Defaults { timeout: 7 });
            Ok(())
        });
    }

    #[test]
    fn file_load_skips_environment() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("TICKETS_DEFAULT_PROFILE", "roaming");
            jail.set_env("TICKETS_PROFILES__PARIS__EVENT_LIMIT", "5");

            let cfg = load_config_file_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.default_profile.as_deref(), Some("paris"));
            assert_eq!(cfg.profiles["paris"].event_limit, 50);
            Ok(())
        });
    }

    #[test]
    fn file_load_reports_malformed_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[profiles.default]\nevent_limit = \"oops\"\n")?;
            let err = load_config_file_from(Path::new("config.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));

            let cfg = load_config_file_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "london".into(),
            Profile {
                city_id: "c51381".into(),
                city_name: Some("London".into()),
                currency: "GBP".into(),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[profiles.london]"));

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["london"], cfg.profiles["london"]);
    }
}
