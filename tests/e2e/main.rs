//! End-to-end tests for the dmx binary
//!
//! A small shell script stands in for dmenu. It reads one pattern per call
//! from the file named by `PICKS` and echoes the first presented line
//! containing it; an empty or missing pattern cancels.

#![cfg(unix)]

mod cli_basic;
mod files_mode;
mod menu_mode;
mod todo_mode;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

const FAKE_PICKER: &str = r#"#!/bin/sh
input=$(cat)
if [ -n "$PROMPTS" ]; then
    printf '%s\n' "$4" >> "$PROMPTS"
fi
pattern=""
if [ -f "$PICKS" ]; then
    pattern=$(head -n 1 "$PICKS")
    tail -n +2 "$PICKS" > "$PICKS.rest"
    mv "$PICKS.rest" "$PICKS"
fi
if [ -z "$pattern" ]; then
    exit 0
fi
printf '%s\n' "$input" | grep -m1 -F -- "$pattern"
exit 0
"#;

pub fn dmx() -> Command {
    let mut cmd = cargo_bin_cmd!("dmx");
    cmd.env_remove("DMX_LOG");
    cmd
}

/// Scratch directory with a fake picker and a config file pointing at it
pub struct Harness {
    pub dir: TempDir,
    config: PathBuf,
    picks: PathBuf,
    prompts: PathBuf,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// `extra` is appended to the generated config file
    pub fn with_config(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let picker = dir.path().join("picker.sh");
        fs::write(&picker, FAKE_PICKER).unwrap();
        fs::set_permissions(&picker, fs::Permissions::from_mode(0o755)).unwrap();

        let config = dir.path().join("dmx.toml");
        fs::write(
            &config,
            format!("[picker]\nprogram = \"{}\"\n\n{}", picker.display(), extra),
        )
        .unwrap();

        Self {
            picks: dir.path().join("picks"),
            prompts: dir.path().join("prompts"),
            dir,
            config,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Patterns for successive picker calls; "" cancels
    pub fn picks(&self, patterns: &[&str]) -> &Self {
        let mut content = patterns.join("\n");
        content.push('\n');
        fs::write(&self.picks, content).unwrap();
        self
    }

    /// Prompts the picker was shown, in order
    pub fn prompts(&self) -> Vec<String> {
        fs::read_to_string(&self.prompts)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = dmx();
        cmd.arg("--config")
            .arg(&self.config)
            .env("PICKS", &self.picks)
            .env("PROMPTS", &self.prompts);
        cmd
    }
}
