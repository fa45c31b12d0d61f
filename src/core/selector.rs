//! Single-shot selection through an external picker
//!
//! [`select`] formats a list, hands it to a [`Picker`] in one go, and maps the
//! line the picker echoes back to the item that produced it. The stock picker
//! is [`Dmenu`], which runs the configured executable once per call.
//!
//! Round-trip matching needs every rendered line of a list to be distinct.
//! When two items render identically the first one in list order wins.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use serde::Deserialize;
use tracing::debug;

use super::format::{format_lines, join_lines};
use super::item::Item;
use crate::error::{DmxError, Result};

/// Something that shows lines to a human and returns the one they chose.
pub trait Picker {
    /// Present `input` (newline-terminated lines) with `prompt` and `rows`
    /// visible rows. Returns the chosen line verbatim, or nothing on cancel.
    fn pick(&self, prompt: &str, rows: usize, input: &[u8]) -> Result<Vec<u8>>;
}

/// Result of one selection round
#[derive(Debug, PartialEq)]
pub enum Selection<'a, T> {
    /// User chose this item
    Selected(&'a T),
    /// User cancelled
    NoSelection,
}

/// Run the picker once over `items` and resolve its answer.
pub fn select<'a, T, P>(picker: &P, prompt: &str, items: &'a [T]) -> Result<Selection<'a, T>>
where
    T: Item,
    P: Picker + ?Sized,
{
    let lines = format_lines(items);
    let output = picker.pick(prompt, items.len(), &join_lines(&lines))?;

    Ok(match resolve(&output, &lines)? {
        Some(index) => Selection::Selected(&items[index]),
        None => Selection::NoSelection,
    })
}

/// Map raw picker output to the index of the first identical line.
///
/// Empty output is a cancel. Output matching nothing means the picker broke
/// its contract and is an error.
pub fn resolve(output: &[u8], lines: &[Vec<u8>]) -> Result<Option<usize>> {
    if output.is_empty() {
        return Ok(None);
    }
    lines
        .iter()
        .position(|line| line.as_slice() == output)
        .map(Some)
        .ok_or_else(|| DmxError::UnmatchedOutput {
            output: String::from_utf8_lossy(output).into_owned(),
        })
}

/// Picker executable and its styling
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// Executable to run (looked up on PATH when not absolute)
    pub program: String,
    pub font: String,
    pub normal_fg: String,
    pub normal_bg: String,
    pub selected_fg: String,
    pub selected_bg: String,
    /// Exit codes treated as a cancel instead of a failure.
    ///
    /// Stock dmenu exits 1 on Escape; list it here to make that a cancel.
    pub cancel_exit_codes: Vec<i32>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            program: "dmenu".to_string(),
            font: "-*-fixed-medium-r-normal--13-*-*-*-*-*-ISO10646-*".to_string(),
            normal_fg: "#000".to_string(),
            normal_bg: "#444".to_string(),
            selected_fg: "#ddd".to_string(),
            selected_bg: "#222".to_string(),
            cancel_exit_codes: Vec::new(),
        }
    }
}

impl PickerSettings {
    /// Command-line arguments for one invocation
    pub fn args(&self, prompt: &str, rows: usize) -> Vec<String> {
        vec![
            "-l".to_string(),
            rows.to_string(),
            "-p".to_string(),
            prompt.to_string(),
            "-fn".to_string(),
            self.font.clone(),
            "-nb".to_string(),
            self.normal_bg.clone(),
            "-nf".to_string(),
            self.normal_fg.clone(),
            "-sb".to_string(),
            self.selected_bg.clone(),
            "-sf".to_string(),
            self.selected_fg.clone(),
        ]
    }
}

/// dmenu-compatible picker process
#[derive(Debug, Clone)]
pub struct Dmenu {
    settings: PickerSettings,
}

impl Dmenu {
    pub fn new(settings: PickerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }
}

impl Picker for Dmenu {
    fn pick(&self, prompt: &str, rows: usize, input: &[u8]) -> Result<Vec<u8>> {
        let program = &self.settings.program;
        debug!(program = %program, rows, prompt, "starting picker");

        let mut child = Command::new(program)
            .args(self.settings.args(prompt, rows))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DmxError::Spawn {
                program: program.clone(),
                source,
            })?;

        // stdin is fed from a second thread while stdout drains here. The
        // child is always reaped, even when feeding it failed.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(input),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("picker input writer panicked")));
            (written, output)
        });
        let output = output?;

        if let Err(e) = written {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        if !output.status.success() {
            let cancelled = output
                .status
                .code()
                .is_some_and(|code| self.settings.cancel_exit_codes.contains(&code));
            if cancelled && output.stdout.is_empty() {
                debug!(status = %output.status, "picker cancelled");
                return Ok(Vec::new());
            }
            return Err(DmxError::PickerFailed {
                program: program.clone(),
                status: output.status.to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "picker finished");
        Ok(output.stdout)
    }
}

/// Scripted answer for [`ScriptedPicker`]
#[derive(Debug, Clone)]
pub enum Answer {
    /// Choose the first presented line containing this text
    Containing(String),
    /// Return nothing
    Cancel,
    /// Return these bytes as-is
    Raw(Vec<u8>),
}

impl Answer {
    pub fn containing(text: impl Into<String>) -> Self {
        Self::Containing(text.into())
    }
}

/// One recorded call to a [`ScriptedPicker`]
#[derive(Debug, Clone)]
pub struct PickerCall {
    pub prompt: String,
    pub rows: usize,
    pub lines: Vec<String>,
}

/// In-process picker replaying a fixed script of answers.
///
/// Calls past the end of the script cancel. Every call is recorded so the
/// presented lists can be inspected afterwards.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    answers: RefCell<VecDeque<Answer>>,
    calls: RefCell<Vec<PickerCall>>,
}

impl ScriptedPicker {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Calls made so far, oldest first
    pub fn calls(&self) -> Vec<PickerCall> {
        self.calls.borrow().clone()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Picker for ScriptedPicker {
    fn pick(&self, prompt: &str, rows: usize, input: &[u8]) -> Result<Vec<u8>> {
        let lines: Vec<String> = String::from_utf8_lossy(input)
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();
        self.calls.borrow_mut().push(PickerCall {
            prompt: prompt.to_string(),
            rows,
            lines: lines.clone(),
        });

        match self.answers.borrow_mut().pop_front() {
            None | Some(Answer::Cancel) => Ok(Vec::new()),
            Some(Answer::Raw(bytes)) => Ok(bytes),
            Some(Answer::Containing(text)) => lines
                .into_iter()
                .find(|line| line.contains(&text))
                .map(String::into_bytes)
                .ok_or_else(|| DmxError::PickerFailed {
                    program: "scripted".to_string(),
                    status: format!("no presented line contains {:?}", text),
                }),
        }
    }
}
