//! To-do list (`dmx todo`)
//!
//! The list lives in `list.txt` as `N title` lines; each item's notes are in
//! `N.md` next to it.

use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::app::config_file::TodoConfig;
use crate::core::{select, sort_items, Item, Picker, Selection};
use crate::error::{DmxError, Result};

const LIST_FILE: &str = "list.txt";

/// One line of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub number: u32,
    pub title: String,
}

impl TodoItem {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.number)
    }
}

impl Item for TodoItem {
    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.number.to_string())
    }

    fn menu_line(&self, key_width: usize) -> Vec<u8> {
        format!("{:>key_width$}  {}\n", self.number, self.title).into_bytes()
    }

    fn sorts_before(&self, other: &Self) -> bool {
        self.number < other.number
    }
}

/// The list file and the item directory it indexes
#[derive(Debug, Clone)]
pub struct TodoList {
    dir: PathBuf,
    items: Vec<TodoItem>,
}

impl TodoList {
    /// Read `list.txt` from `dir`. A missing or unreadable list is empty.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let list_path = dir.join(LIST_FILE);
        let content = match fs::read_to_string(&list_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %list_path.display(), "unable to read list: {}", e);
                String::new()
            }
        };

        let line_re =
            Regex::new(r"^(\d+)\s+(.+)$").map_err(|e| DmxError::invalid(e.to_string()))?;
        let mut items = Vec::new();
        for line in content.lines() {
            let Some(caps) = line_re.captures(line) else {
                continue;
            };
            match caps[1].parse::<u32>() {
                Ok(number) => items.push(TodoItem {
                    number,
                    title: caps[2].to_string(),
                }),
                Err(e) => warn!(line, "skipping list line: {}", e),
            }
        }
        sort_items(&mut items);

        Ok(Self { dir, items })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item_path(&self, item: &TodoItem) -> PathBuf {
        self.dir.join(item.file_name())
    }

    /// Smallest positive number not already on the list
    pub fn next_number(&self) -> u32 {
        let mut next = 1;
        for item in &self.items {
            match item.number.cmp(&next) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => next += 1,
                std::cmp::Ordering::Greater => break,
            }
        }
        next
    }

    /// Add a title under the next free number, keeping the list ordered
    pub fn push(&mut self, title: impl Into<String>) -> TodoItem {
        let item = TodoItem {
            number: self.next_number(),
            title: title.into(),
        };
        self.items.push(item.clone());
        sort_items(&mut self.items);
        item
    }

    pub fn remove(&mut self, number: u32) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.number == number)?;
        Some(self.items.remove(index))
    }

    /// Rewrite `list.txt`
    pub fn save(&self) -> Result<()> {
        let path = self.dir.join(LIST_FILE);
        let mut out = String::new();
        for item in &self.items {
            out.push_str(&format!("{} {}\n", item.number, item.title));
        }
        fs::write(&path, out).map_err(|e| DmxError::storage(&path, e))?;
        debug!(path = %path.display(), items = self.items.len(), "list written");
        Ok(())
    }

    /// Delete every `N.md` the list no longer refers to. Returns how many went.
    pub fn tidy(&self) -> Result<usize> {
        let name_re = Regex::new(r"^\d+\.md$").map_err(|e| DmxError::invalid(e.to_string()))?;
        let in_use: Vec<String> = self.items.iter().map(TodoItem::file_name).collect();

        let entries = fs::read_dir(&self.dir).map_err(|e| DmxError::enumeration(&self.dir, e))?;
        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| DmxError::enumeration(&self.dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name_re.is_match(&name) || in_use.contains(&name) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!(name = %name, "unable to remove: {}", e),
            }
        }
        Ok(removed)
    }

    /// Let the user pick an item (prompt `>`)
    pub fn choose<P: Picker + ?Sized>(&self, picker: &P) -> Result<Option<TodoItem>> {
        Ok(match select(picker, ">", &self.items)? {
            Selection::Selected(item) => Some(item.clone()),
            Selection::NoSelection => None,
        })
    }
}

/// Build a command from a whitespace-separated command line
fn command_line(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| DmxError::invalid("empty command line"))?;
    let mut cmd = Command::new(program);
    cmd.args(parts);
    Ok(cmd)
}

fn run(mut cmd: Command, line: &str) -> Result<()> {
    debug!(command = line, "running helper");
    let status = cmd.status().map_err(|e| DmxError::command(line, e))?;
    if !status.success() {
        return Err(DmxError::command(line, status));
    }
    Ok(())
}

/// Create a new item titled `title` and record it in the list.
///
/// The item file starts with `# title`. With an editor configured the user
/// edits it; otherwise `body` is appended.
pub fn add<R: Read + ?Sized>(
    list: &mut TodoList,
    title: &str,
    editor: &str,
    body: &mut R,
) -> Result<TodoItem> {
    fs::create_dir_all(list.dir()).map_err(|e| DmxError::storage(list.dir(), e))?;
    let item = list.push(title);
    let path = list.item_path(&item);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }
    let mut file = options.open(&path).map_err(|e| DmxError::storage(&path, e))?;
    writeln!(file, "# {}\n", title).map_err(|e| DmxError::storage(&path, e))?;

    if editor.trim().is_empty() {
        io::copy(body, &mut file).map_err(|e| DmxError::storage(&path, e))?;
        drop(file);
    } else {
        drop(file);
        let mut cmd = command_line(editor)?;
        cmd.arg(&path).stdin(Stdio::inherit());
        run(cmd, editor)?;
    }

    list.save()?;
    info!(number = item.number, "todo item added");
    Ok(item)
}

/// Copy an item's file to `out`
pub fn show<W: Write + ?Sized>(list: &TodoList, item: &TodoItem, out: &mut W) -> Result<()> {
    let path = list.item_path(item);
    let mut file = File::open(&path).map_err(|e| DmxError::enumeration(&path, e))?;
    io::copy(&mut file, out)?;
    out.flush()?;
    Ok(())
}

/// Render an item through the formatter into a temporary HTML file and open
/// it in the viewer. The file is removed once the viewer exits.
pub fn pretty(list: &TodoList, item: &TodoItem, config: &TodoConfig) -> Result<()> {
    let path = list.item_path(item);
    let source = File::open(&path).map_err(|e| DmxError::enumeration(&path, e))?;

    let html = tempfile::Builder::new()
        .prefix("dmx-todo-")
        .suffix(".html")
        .tempfile_in(&config.temp_dir)
        .map_err(|e| DmxError::storage(&config.temp_dir, e))?;
    let sink = html
        .as_file()
        .try_clone()
        .map_err(|e| DmxError::storage(html.path(), e))?;

    let mut formatter = command_line(&config.formatter)?;
    formatter.stdin(Stdio::from(source)).stdout(Stdio::from(sink));
    run(formatter, &config.formatter)?;

    let mut viewer = command_line(&config.viewer)?;
    viewer.arg(html.path());
    run(viewer, &config.viewer)
}

/// Pick an item, drop it from the list and rewrite the list.
///
/// The item's file stays until the next tidy.
pub fn expunge<P: Picker + ?Sized>(list: &mut TodoList, picker: &P) -> Result<Option<TodoItem>> {
    let Some(item) = list.choose(picker)? else {
        return Ok(None);
    };
    list.remove(item.number);
    list.save()?;
    info!(number = item.number, "todo item removed");
    Ok(Some(item))
}
