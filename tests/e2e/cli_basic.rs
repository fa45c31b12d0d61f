//! Basic CLI tests for dmx
//!
//! Help, version and exit codes for bad arguments and failed runs.

use predicates::prelude::*;

use super::{dmx, Harness};

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_lists_subcommands() {
    dmx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("files"))
        .stdout(predicate::str::contains("clip"))
        .stdout(predicate::str::contains("todo"));
}

#[test]
fn subcommand_help_shows_flags() {
    dmx()
        .args(["menu", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DATA_FILE"))
        .stdout(predicate::str::contains("--expunge"));
}

#[test]
fn help_documents_escape_cancel() {
    dmx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cancel_exit_codes = [1]"))
        .stdout(predicate::str::contains("dmx.toml.example"));
}

#[test]
fn version_flag_shows_version() {
    dmx()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn missing_subcommand_exits_one() {
    dmx().assert().code(1);
}

#[test]
fn unknown_flag_exits_one() {
    dmx()
        .args(["files", "--no-such-flag"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn clip_without_action_exits_one() {
    dmx().arg("clip").assert().code(1);
}

#[test]
fn menu_add_without_key_exits_one() {
    let h = Harness::new();
    let data = h.path("menu.json");
    std::fs::write(&data, "").unwrap();
    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-n", "-d", "desc", "-v", "val"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

// =============================================================================
// Runtime Errors
// =============================================================================

#[test]
fn missing_picker_program_exits_one() {
    let h = Harness::new();
    let config = h.path("broken.toml");
    std::fs::write(&config, "[picker]\nprogram = \"/nonexistent/dmenu\"\n").unwrap();

    dmx()
        .arg("--config")
        .arg(&config)
        .arg("files")
        .arg(h.dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/dmenu"));
}

#[test]
fn unreadable_config_falls_back_to_defaults() {
    let h = Harness::new();
    let config = h.path("bad.toml");
    std::fs::write(&config, "this is = = not toml").unwrap();

    // A broken config only warns; the run then fails on the data file
    dmx()
        .arg("--config")
        .arg(&config)
        .arg("menu")
        .arg(h.path("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn escape_exit_code_is_cancel_when_configured() {
    let h = Harness::new();
    let strict = h.path("strict.toml");
    let lenient = h.path("lenient.toml");
    // `false` behaves like dmenu on Escape: no output, exit 1
    std::fs::write(&strict, "[picker]\nprogram = \"false\"\n").unwrap();
    std::fs::write(
        &lenient,
        "[picker]\nprogram = \"false\"\ncancel_exit_codes = [1]\n",
    )
    .unwrap();

    dmx()
        .arg("--config")
        .arg(&strict)
        .arg("files")
        .arg(h.dir.path())
        .assert()
        .code(1);

    dmx()
        .arg("--config")
        .arg(&lenient)
        .arg("files")
        .arg(h.dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
