//! Integration tests for CLI behavior.
//!
//! Tests that the binary accepts standard flags, each subcommand responds
//! to `--help`, and `resolve` / `inspect` print the expected resolution.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

const FEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/videos.json");
const CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/embedres.toml");

/// Helper: get a Command for the `embedres` binary with the fixture config.
fn embedres() -> Command {
    let mut cmd = Command::cargo_bin("embedres").expect("binary 'embedres' should be built");
    cmd.args(["--config", CONFIG]);
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    embedres()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: embedres"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_shows_semver() {
    Command::cargo_bin("embedres")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^embedres \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    Command::cargo_bin("embedres")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: embedres"));
}

#[test]
fn resolve_help() {
    embedres()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--player-url"))
        .stdout(predicate::str::contains("--iframe"))
        .stdout(predicate::str::contains("--bvid"))
        .stdout(predicate::str::contains("--src"));
}

// ─── resolve ─────────────────────────────────────────────────────────────────

#[test]
fn resolve_bvid_prints_player_and_page() {
    embedres()
        .args(["resolve", "--bvid", "BV1xx411c7mD", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=3",
        ))
        .stdout(predicate::str::contains(
            "https://www.bilibili.com/video/BV1xx411c7mD?p=3",
        ));
}

#[test]
fn resolve_protocol_relative_json() {
    let output = embedres()
        .args([
            "resolve",
            "--player-url",
            "//player.bilibili.com/player.html?bvid=BV1yy&page=2",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["resolved"]["status"], "embeddable");
    assert_eq!(
        report["resolved"]["player_url"],
        "https://player.bilibili.com/player.html?bvid=BV1yy&page=2"
    );
    assert_eq!(
        report["resolved"]["page_url"],
        "https://www.bilibili.com/video/BV1yy?p=2"
    );
    assert_eq!(report["render_mode"]["mode"], "use_iframe");
}

#[test]
fn resolve_nothing_with_src_uses_native_media() {
    embedres()
        .args(["resolve", "--src", "/videos/a.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unresolved"))
        .stdout(predicate::str::contains("native /videos/a.mp4"));
}

#[test]
fn resolve_nothing_at_all() {
    embedres()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("no playable source"));
}

#[test]
fn resolve_rejects_conflicting_descriptors() {
    embedres()
        .args(["resolve", "--bvid", "BV1ab", "--player-url", "https://x.test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn resolve_page_requires_bvid() {
    embedres()
        .args(["resolve", "--page", "2"])
        .assert()
        .failure();
}

// ─── inspect ─────────────────────────────────────────────────────────────────

#[test]
fn inspect_watch_page_item() {
    embedres()
        .args(["inspect", FEED, "night-drive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Night Drive"))
        .stdout(predicate::str::contains(
            "https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=2",
        ))
        .stdout(predicate::str::contains("Body: 2 paragraphs"));
}

#[test]
fn inspect_by_numeric_id() {
    embedres()
        .args(["inspect", FEED, "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbor"))
        .stdout(predicate::str::contains("native /videos/harbor.mp4"))
        .stdout(predicate::str::contains("/covers/placeholder.jpg"));
}

#[test]
fn inspect_music_record_json() {
    let output = embedres()
        .args(["inspect", FEED, "etude", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let p: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(p["title"], "Etude No. 1");
    assert_eq!(p["poster_url"], "/covers/etude.jpg");
    assert_eq!(
        p["resolved"]["page_url"],
        "https://www.bilibili.com/video/BV1ab411c7mE?p=3"
    );
}

#[test]
fn inspect_item_without_source() {
    embedres()
        .args(["inspect", FEED, "sketch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no playable source"));
}

#[test]
fn inspect_tolerates_loosely_typed_records() {
    embedres()
        .args(["inspect", FEED, "rehearsal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://player.bilibili.com/player.html?bvid=BV1cd411c7mF&page=2",
        ));
}

#[test]
fn inspect_skips_unparsable_records() {
    embedres()
        .args(["inspect", FEED, "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn inspect_unknown_slug_fails() {
    embedres()
        .args(["inspect", FEED, "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn inspect_missing_file_fails() {
    embedres()
        .args(["inspect", "/nonexistent/videos.json", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load content feed"));
}

// ─── config ──────────────────────────────────────────────────────────────────

#[test]
fn config_prints_effective_values() {
    embedres()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("embedres.toml"))
        .stdout(predicate::str::contains("host = \"bilibili.com\""))
        .stdout(predicate::str::contains("placeholder_poster"));
}
