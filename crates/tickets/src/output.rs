//! Rendering for `--output`.
//!
//! `table` is human oriented (tabled rows or a detail view), `json`,
//! `json-compact` and `yaml` serialize the underlying data unchanged, and
//! `plain` prints one identifier per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Styling ──────────────────────────────────────────────────────────

/// `auto` colors only an interactive stdout without `NO_COLOR`.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal(),
    }
}

pub fn heading(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.bold())
    } else {
        text.to_owned()
    }
}

pub fn yes_no(value: bool, color: bool) -> String {
    let word = if value { "yes" } else { "no" };
    match (color, value) {
        (false, _) => word.to_owned(),
        (true, true) => format!("{}", word.green()),
        (true, false) => format!("{}", word.red()),
    }
}

// ── Rendering ────────────────────────────────────────────────────────

/// Render a collection: `to_row` feeds the table, `id_fn` the plain lines.
pub fn render_list<T, R>(
    format: &OutputFormat,
    items: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    if let Some(text) = serialized(format, items) {
        return text;
    }
    match format {
        OutputFormat::Plain => items.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
        _ => Table::new(items.iter().map(to_row))
            .with(Style::rounded())
            .to_string(),
    }
}

/// Render one value: `detail_fn` for table output, `id_fn` for plain.
pub fn render_single<T: Serialize>(
    format: &OutputFormat,
    item: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String {
    if let Some(text) = serialized(format, item) {
        return text;
    }
    match format {
        OutputFormat::Plain => id_fn(item),
        _ => detail_fn(item),
    }
}

/// Write `rendered` plus a newline to stdout unless quiet or empty.
pub fn print_output(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    // Write errors (closed pipe under `| head`) are dropped.
    let _ = writeln!(io::stdout().lock(), "{rendered}");
}

/// JSON / YAML rendering, or `None` for the human formats.
fn serialized<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> Option<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).expect("JSON output of plain data"),
        OutputFormat::JsonCompact => serde_json::to_string(data).expect("JSON output of plain data"),
        OutputFormat::Yaml => serde_yaml::to_string(data).expect("YAML output of plain data"),
        OutputFormat::Table | OutputFormat::Plain => return None,
    };
    Some(text)
}
