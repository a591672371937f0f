//! Clap derive structures for the `tickets` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace types so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tickets -- browse, search and book tourist events from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "tickets",
    version,
    about = "Browse, search and book tourist events from the command line",
    long_about = "Fetches ticket and event listings for a city from the events backend,\n\
        or from the bundled sample dataset, and builds booking links for them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "TICKETS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// City id to track, or "auto" (overrides profile)
    #[arg(long, short = 'c', env = "TICKETS_CITY", global = true)]
    pub city: Option<String>,

    /// Currency code for prices and booking links (overrides profile)
    #[arg(long, env = "TICKETS_CURRENCY", global = true)]
    pub currency: Option<String>,

    /// Serve the bundled sample dataset
    #[arg(long, global = true, conflicts_with = "live")]
    pub sample: bool,

    /// Call the live events backend
    #[arg(long, global = true)]
    pub live: bool,

    /// Events backend root URL (overrides profile)
    #[arg(long, env = "TICKETS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TICKETS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of events per query
    #[arg(long, short = 'l', global = true)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TICKETS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List current events for the tracked city
    #[command(alias = "ls")]
    Events(EventsArgs),

    /// List known cities
    Cities,

    /// Resolve a location to a city
    #[command(alias = "loc")]
    Location(LocationArgs),

    /// Search events across all cities
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Events of the tracked city within a date range
    Dates(DatesArgs),

    /// Events near a coordinate
    Nearby(NearbyArgs),

    /// Build a booking link for an event
    #[command(alias = "book")]
    BookingUrl(BookingUrlArgs),

    /// Refresh the tracked city's events and print a summary
    Refresh,

    /// Show events as calendar entries
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// Show a sensor projection of the current events
    Sensor(SensorArgs),

    /// List callable services
    Services,

    /// Call a service by name with a JSON payload
    Call(CallArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EVENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Include booking links and QR codes in structured output
    #[arg(long)]
    pub enriched: bool,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// IP address to resolve (defaults to the caller)
    #[arg(long)]
    pub ip: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query matched against titles, descriptions and types
    pub query: String,
}

#[derive(Debug, Args)]
pub struct DatesArgs {
    /// First day, YYYY-MM-DD
    pub from: String,

    /// Last day, YYYY-MM-DD (defaults to FROM)
    pub to: Option<String>,
}

#[derive(Debug, Args)]
pub struct NearbyArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Search radius in kilometres
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingUrlArgs {
    /// Event id from the current listing
    pub event_id: u64,

    /// Visit date, YYYY-MM-DD
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Timeslot id
    #[arg(long)]
    pub timeslot: Option<String>,

    /// Ticket variant and quantity as VARIANT=QTY (repeatable)
    #[arg(long = "ticket", short = 't', value_name = "VARIANT=QTY")]
    pub tickets: Vec<String>,

    /// Ticket language code (eng, fra, deu, ...)
    #[arg(long)]
    pub language: Option<String>,

    /// Also print the link as a PNG data URI QR code
    #[arg(long)]
    pub qr: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROJECTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Only entries overlapping this day or later, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Only entries overlapping this day or earlier, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Show only the next upcoming entry
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub next: bool,
}

#[derive(Debug, Args)]
pub struct SensorArgs {
    /// Which sensor to project
    #[arg(default_value = "today")]
    pub kind: SensorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SensorChoice {
    /// Events in the tracked city
    Today,
    /// Events near the tracked city
    Nearby,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Service name (see: tickets services)
    pub service: String,

    /// JSON payload, e.g. '{"query": "museum"}'
    pub payload: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (e.g. "city_id", "currency", "use_sample_data")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
