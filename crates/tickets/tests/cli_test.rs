//! Integration tests for the `tickets` CLI binary.
//!
//! Everything runs against the bundled sample dataset with the config file
//! pointed at a temporary path, so no network or user configuration is
//! touched.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tickets` binary with env isolation.
fn tickets_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tickets");
    cmd.env("TICKETS_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("TICKETS_PROFILE")
        .env_remove("TICKETS_CITY")
        .env_remove("TICKETS_CURRENCY")
        .env_remove("TICKETS_BASE_URL")
        .env_remove("TICKETS_TIMEOUT")
        .env_remove("TICKETS_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn scratch() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

fn stdout_json(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stdout_lines(cmd: &mut assert_cmd::Command) -> Vec<String> {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_usage() {
    let (_dir, config) = scratch();
    let output = tickets_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let (_dir, config) = scratch();
    tickets_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("events")
            .and(predicate::str::contains("booking-url"))
            .and(predicate::str::contains("calendar")),
    );
}

#[test]
fn version_flag() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tickets"));
}

#[test]
fn completions_bash() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn sample_and_live_conflict() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "--live", "cities"])
        .assert()
        .code(2);
}

// ── Listings ────────────────────────────────────────────────────────

#[test]
fn cities_plain() {
    let (_dir, config) = scratch();
    let lines = stdout_lines(tickets_cmd(&config).args(["--sample", "cities", "-o", "plain"]));
    assert_eq!(lines, ["c76753", "c67097", "c51381", "c47717"]);
}

#[test]
fn events_default_to_resolved_city() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args(["--sample", "events", "-o", "json"]));
    assert_eq!(json["destination_title"], "Bucharest");
    assert_eq!(json["events"].as_array().unwrap().len(), 8);
    assert_eq!(json["total_count"], 8);
}

#[test]
fn events_for_fixed_city_with_limit() {
    let (_dir, config) = scratch();
    let lines = stdout_lines(tickets_cmd(&config).args([
        "--sample", "--city", "c67097", "--limit", "2", "events", "-o", "plain",
    ]));
    assert_eq!(lines, ["123456", "234567"]);
}

#[test]
fn events_table_has_headers() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "--city", "c51381", "events"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Title")
                .and(predicate::str::contains("Tower of London Tickets"))
                .and(predicate::str::contains("£40.50"))
                .and(predicate::str::contains("free")),
        );
}

#[test]
fn enriched_events_carry_booking_links() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args([
        "--sample", "--city", "c47717", "--currency", "usd", "events", "--enriched", "-o",
        "json",
    ]));
    let first = &json[0];
    assert_eq!(first["id"], 456_789);
    assert!(
        first["booking_url_with_params"]
            .as_str()
            .unwrap()
            .contains("currency=USD")
    );
    assert!(
        first["qr_code_data"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
}

#[test]
fn search_goes_through_service() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args(["--sample", "search", "louvre", "-o", "json"]));
    assert_eq!(json["location_type"], "search");
    assert_eq!(json["events"][0]["id"], 234_567);
}

#[test]
fn nearby_rejects_bad_coordinates() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "nearby", "--lat", "91", "--lon", "0"])
        .assert()
        .code(2);
}

#[test]
fn nearby_accepts_negative_coordinates() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args([
        "--sample", "nearby", "--lat", "-33.86", "--lon", "-151.2", "-o", "json",
    ]));
    assert_eq!(json["location_type"], "nearby");
}

// ── Date range ──────────────────────────────────────────────────────

#[test]
fn dates_for_undated_city_return_everything() {
    let (_dir, config) = scratch();
    let lines = stdout_lines(tickets_cmd(&config).args([
        "--sample", "--city", "c51381", "dates", "2030-01-01", "-o", "plain",
    ]));
    assert_eq!(lines, ["345678", "678901"]);
}

#[test]
fn dates_reject_inverted_range() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "dates", "2026-05-02", "2026-05-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("after"));
}

#[test]
fn dates_reject_malformed_input() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "dates", "tomorrow"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

// ── Booking ─────────────────────────────────────────────────────────

#[test]
fn booking_url_with_params() {
    let (_dir, config) = scratch();
    let lines = stdout_lines(tickets_cmd(&config).args([
        "--sample",
        "booking-url",
        "976227",
        "--date",
        "2026-05-01",
        "-t",
        "47923=1",
        "--language",
        "ENG",
        "-o",
        "plain",
    ]));
    let url = &lines[0];
    assert!(url.starts_with(
        "https://www.tiqets.com/en/bucharest-attractions/palace-of-the-parliament/?currency=EUR"
    ));
    assert!(url.contains("selected_date=2026-05-01"));
    assert!(url.contains("selected_variant_language=eng"));
    assert!(url.contains("selected_variants=47923%3D1"));
}

#[test]
fn booking_url_with_qr() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args([
        "--sample", "booking-url", "976228", "--qr", "-o", "json",
    ]));
    assert_eq!(json["event_title"], "National Museum of Art of Romania");
    assert!(
        json["qr_code_data"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
}

#[test]
fn booking_url_unknown_event() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "booking-url", "42"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("event '42' not found"));
}

#[test]
fn booking_url_rejects_bad_ticket() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "booking-url", "976227", "-t", "adult"])
        .assert()
        .code(2);
}

// ── Projections ─────────────────────────────────────────────────────

#[test]
fn refresh_summary() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args(["--sample", "refresh", "-o", "json"]));
    assert_eq!(json["city_id"], "c76753");
    assert_eq!(json["city_name"], "Bucharest");
    assert_eq!(json["events"], 8);
    assert_eq!(json["mode"], "sample");
}

#[test]
fn sensor_projection() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args(["--sample", "sensor", "nearby", "-o", "json"]));
    assert_eq!(json["kind"], "nearby");
    assert_eq!(json["available"], true);
    assert_eq!(json["value"], 8);
    assert_eq!(json["attributes"]["destination_title"], "Bucharest");
}

#[test]
fn calendar_entries() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args([
        "--sample", "--city", "c67097", "calendar", "-o", "json",
    ]));
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0]["start"].as_str().unwrap().ends_with("T10:00:00"));
}

// ── Services ────────────────────────────────────────────────────────

#[test]
fn services_are_listed() {
    let (_dir, config) = scratch();
    let output = tickets_cmd(&config)
        .args(["services", "-o", "plain"])
        .output()
        .unwrap();
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout), @r"
    search_events
    get_events_by_date
    generate_booking_url
    refresh_events
    ");
}

#[test]
fn call_service_by_name() {
    let (_dir, config) = scratch();
    let json = stdout_json(tickets_cmd(&config).args([
        "--sample",
        "call",
        "search_events",
        r#"{"query": "ravens"}"#,
    ]));
    assert_eq!(json["success"], true);
    assert_eq!(json["results"]["events"][0]["id"], 345_678);
}

#[test]
fn call_unknown_service_reports_failure() {
    let (_dir, config) = scratch();
    let output = tickets_cmd(&config)
        .args(["--sample", "call", "launch_rockets"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"],
        "Validation failed: Unknown service: launch_rockets"
    );
}

#[test]
fn call_rejects_unknown_payload_fields() {
    let (_dir, config) = scratch();
    let output = tickets_cmd(&config)
        .args(["--sample", "call", "search_events", r#"{"q": "x"}"#])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["error"].as_str().unwrap().contains("invalid service data"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn config_path_honours_override() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.to_string_lossy().as_ref()));
}

#[test]
fn config_set_then_use_profile() {
    let (_dir, config) = scratch();

    tickets_cmd(&config)
        .args(["config", "set", "city_id", "c47717"])
        .assert()
        .success();
    tickets_cmd(&config)
        .args(["config", "set", "currency", "chf"])
        .assert()
        .success();

    let shown = stdout_json(tickets_cmd(&config).args(["config", "show", "-o", "json"]));
    assert_eq!(shown["profiles"]["default"]["city_id"], "c47717");
    assert_eq!(shown["profiles"]["default"]["currency"], "CHF");

    let json = stdout_json(tickets_cmd(&config).args(["events", "-o", "json"]));
    assert_eq!(json["destination_title"], "Rome");
    assert_eq!(json["currency"], "CHF");
}

#[test]
fn config_set_rejects_unknown_key() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["config", "set", "colour", "red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
    assert!(!config.exists());
}

#[test]
fn config_set_keeps_malformed_file_untouched() {
    let (_dir, config) = scratch();
    let original = "[profiles.default]\ncity_id = \"c67097\"\nevent_limit = \"oops\"\n";
    std::fs::write(&config, original).unwrap();

    tickets_cmd(&config)
        .args(["config", "set", "currency", "GBP"])
        .assert()
        .failure();
    tickets_cmd(&config)
        .args(["config", "use", "default"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&config).unwrap(), original);
}

#[test]
fn config_set_does_not_persist_environment_overrides() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["config", "set", "city_id", "c47717"])
        .assert()
        .success();

    tickets_cmd(&config)
        .env("TICKETS_PROFILES__DEFAULT__EVENT_LIMIT", "7")
        .args(["config", "set", "currency", "GBP"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("currency = \"GBP\""), "{written}");
    assert!(written.contains("event_limit = 50"), "{written}");
}

#[test]
fn zero_timeout_is_rejected() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "--timeout", "0", "events"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));

    std::fs::write(&config, "[profiles.default]\ntimeout = 0\n").unwrap();
    tickets_cmd(&config)
        .args(["--sample", "events"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timeout"));
}

#[test]
fn unknown_profile_fails() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--profile", "work", "--sample", "events"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Profile 'work' not found"));
}

#[test]
fn invalid_currency_flag_fails() {
    let (_dir, config) = scratch();
    tickets_cmd(&config)
        .args(["--sample", "--currency", "XYZ", "events"])
        .assert()
        .code(2);
}
