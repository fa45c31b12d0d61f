//! Menu mode tests for dmx
//!
//! Browsing, adding and removing through `dmx menu` with the fake picker.

use std::fs;
use std::path::PathBuf;

use predicates::prelude::*;

use super::Harness;

const MENU: &str = r#"{"key":"web","desc":"bookmarks","stuff":[
  {"key":"rust","desc":"Rust home","val":"https://www.rust-lang.org"}
]}
{"key":"hi","desc":"say hello","val":"hello"}
{"key":".secret","desc":"hidden one","val":"psst"}
"#;

fn menu_file(h: &Harness) -> PathBuf {
    let path = h.path("menu.json");
    fs::write(&path, MENU).unwrap();
    path
}

// =============================================================================
// Browse
// =============================================================================

#[test]
fn browse_prints_nested_value() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["web/", "Rust home"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-p", "go:"])
        .assert()
        .success()
        .stdout("https://www.rust-lang.org\n");
    assert_eq!(h.prompts(), vec!["go:", "go:web/"]);
}

#[test]
fn browse_cancel_prints_nothing() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&[""]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn browse_back_from_category() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["web/", "", "say hello"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn browse_hidden_flag_lists_hidden_entries() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["hidden one"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .arg("--hidden")
        .assert()
        .success()
        .stdout("psst\n");
}

#[test]
fn browse_with_template_into_file() {
    let h = Harness::new();
    let data = menu_file(&h);
    let out = h.path("out.txt");
    fs::write(&out, "before\n").unwrap();

    h.picks(&["say hello"]);
    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-f", "echo %s\n", "-a", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(&out).unwrap(), "before\necho hello\n");
}

#[test]
fn custom_separator() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["web>", "Rust home"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-s", ">"])
        .assert()
        .success()
        .stdout("https://www.rust-lang.org\n");
}

// =============================================================================
// Add and Expunge
// =============================================================================

#[test]
fn add_entry_into_category() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["web/", "choose current category"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-n", "-k", "crates", "-d", "registry", "-v", "https://crates.io"])
        .assert()
        .success();

    h.picks(&["web/", "registry"]);
    h.cmd()
        .arg("menu")
        .arg(&data)
        .assert()
        .success()
        .stdout("https://crates.io\n");
}

#[test]
fn add_duplicate_key_fails() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["choose current category"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .args(["-n", "-k", "hi", "-d", "again", "-v", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'hi' already exists"));
    assert_eq!(fs::read_to_string(&data).unwrap(), MENU);
}

#[test]
fn expunge_entry() {
    let h = Harness::new();
    let data = menu_file(&h);
    h.picks(&["say hello"]);

    h.cmd().arg("menu").arg(&data).arg("-x").assert().success();
    let rewritten = fs::read_to_string(&data).unwrap();
    assert!(!rewritten.contains("say hello"));
    assert!(rewritten.contains("Rust home"));
}

#[cfg(unix)]
#[test]
fn rewrite_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let h = Harness::new();
    let data = menu_file(&h);
    fs::set_permissions(&data, fs::Permissions::from_mode(0o600)).unwrap();
    h.picks(&["say hello"]);

    h.cmd().arg("menu").arg(&data).arg("-x").assert().success();
    let mode = fs::metadata(&data).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[cfg(unix)]
#[test]
fn rewrite_through_symlink_keeps_link() {
    let h = Harness::new();
    let real = menu_file(&h);
    let link = h.path("link.json");
    std::os::unix::fs::symlink(&real, &link).unwrap();
    h.picks(&["say hello"]);

    h.cmd().arg("menu").arg(&link).arg("-x").assert().success();
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert!(!fs::read_to_string(&real).unwrap().contains("say hello"));
}

#[test]
fn browse_entry_with_multiline_description() {
    let h = Harness::new();
    let data = h.path("lines.json");
    fs::write(&data, r#"{"key":"a","desc":"two\nlines","val":"A"}"#).unwrap();
    h.picks(&["two lines"]);

    h.cmd()
        .arg("menu")
        .arg(&data)
        .assert()
        .success()
        .stdout("A\n");
}
