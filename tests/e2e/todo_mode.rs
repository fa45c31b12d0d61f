//! To-do list tests for dmx
//!
//! `dmx todo` with no editor configured, so item bodies come from stdin.

use std::fs;

use super::Harness;

fn harness() -> Harness {
    let h = Harness::new();
    let extra = format!(
        "[todo]\ndir = \"{}\"\neditor = \"\"\n",
        h.path("todo").display()
    );
    let config = h.path("dmx.toml");
    let mut content = fs::read_to_string(&config).unwrap();
    content.push_str(&extra);
    fs::write(&config, content).unwrap();
    h
}

#[test]
fn add_then_show() {
    let h = harness();
    h.cmd()
        .args(["todo", "-a", "water", "the", "plants"])
        .write_stdin("twice a week\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(h.path("todo").join("list.txt")).unwrap(),
        "1 water the plants\n"
    );

    h.picks(&["water"]);
    h.cmd()
        .arg("todo")
        .assert()
        .success()
        .stdout("# water the plants\n\ntwice a week\n");
    assert_eq!(h.prompts(), vec![">"]);
}

#[test]
fn expunge_and_tidy() {
    let h = harness();
    for title in ["first", "second"] {
        h.cmd()
            .args(["todo", "-a", title])
            .write_stdin("")
            .assert()
            .success();
    }

    h.picks(&["first"]);
    h.cmd().args(["todo", "-x", "-t"]).assert().success();

    let dir = h.path("todo");
    assert_eq!(
        fs::read_to_string(dir.join("list.txt")).unwrap(),
        "2 second\n"
    );
    assert!(!dir.join("1.md").exists());
    assert!(dir.join("2.md").exists());
}
