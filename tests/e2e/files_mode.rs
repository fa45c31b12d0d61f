//! File chooser tests for dmx
//!
//! `dmx files` over a scratch directory with the fake picker.

use std::fs;

use predicates::prelude::*;

use super::Harness;

fn populate(h: &Harness) -> std::path::PathBuf {
    let root = h.path("tree");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src").join("lib.rs"), "").unwrap();
    fs::write(root.join("README"), "").unwrap();
    fs::write(root.join(".env"), "").unwrap();
    root
}

#[test]
fn choose_file_in_subdirectory() {
    let h = Harness::new();
    let root = populate(&h);
    h.picks(&["src/", "lib.rs"]);

    h.cmd()
        .arg("files")
        .arg(&root)
        .assert()
        .success()
        .stdout(format!("{}\n", root.join("src").join("lib.rs").display()));

    let prompts = h.prompts();
    assert_eq!(prompts[0], root.display().to_string());
    assert_eq!(prompts[1], root.join("src").display().to_string());
}

#[test]
fn select_directory_with_template() {
    let h = Harness::new();
    let root = populate(&h);
    h.picks(&["src/", "select current directory"]);

    h.cmd()
        .arg("files")
        .arg(&root)
        .args(["-d", "-f", "cd '%s'"])
        .assert()
        .success()
        .stdout(format!("cd '{}'", root.join("src").display()));
}

#[test]
fn hidden_files_after_toggle() {
    let h = Harness::new();
    let root = populate(&h);
    h.picks(&["show hidden files", ".env"]);

    h.cmd()
        .arg("files")
        .arg(&root)
        .assert()
        .success()
        .stdout(format!("{}\n", root.join(".env").display()));
}

#[test]
fn cancel_climbs_to_parent() {
    let h = Harness::new();
    let root = populate(&h);
    h.picks(&["", "README"]);

    h.cmd()
        .arg("files")
        .arg(root.join("src"))
        .assert()
        .success()
        .stdout(format!("{}\n", root.join("README").display()));
}

#[test]
fn start_must_be_a_directory() {
    let h = Harness::new();
    let root = populate(&h);

    h.cmd()
        .arg("files")
        .arg(root.join("README"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}
