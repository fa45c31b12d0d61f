//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::error::{DmxError, Result};
use crate::integrate::{ChooserOptions, OutputTarget, OutputTemplate};
use crate::tree::{Category, Entry, MenuItem};

const CONFIG_HELP: &str = "\
CONFIG FILE:
    --config PATH            Tried first, in the order given
    ~/.config/dmx.toml       User configuration
    /usr/share/dmx.toml      System configuration
    Only the first file found is read. See dmx.toml.example.

    Stock dmenu exits 1 on Escape, which dmx reports as an error unless
    the [picker] section lists it as a cancel:

        [picker]
        cancel_exit_codes = [1]

ENVIRONMENT:
    DMX_LOG                  Log filter, e.g. DMX_LOG=debug";

#[derive(Parser, Debug)]
#[command(
    name = "dmx",
    version,
    about = "dmenu-driven menus, file chooser, clipboard manager and to-do list",
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Configuration file to try before the default locations (repeatable)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Vec<PathBuf>,

    /// Debug logging on stderr (overridden by DMX_LOG)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick a value from a hierarchical JSON menu, or edit the menu
    Menu(MenuArgs),
    /// Choose a file or directory
    Files(FilesArgs),
    /// Save, recall or delete clipboard snapshots
    Clip(ClipArgs),
    /// Show, add or finish to-do items
    Todo(TodoArgs),
}

#[derive(Args, Debug)]
pub struct MenuArgs {
    /// Menu document
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Category separator
    #[arg(short = 's', value_name = "SEP")]
    pub separator: Option<String>,

    /// Base prompt
    #[arg(short = 'p', value_name = "PROMPT", default_value = "")]
    pub prompt: String,

    /// Add a new entry (or category with -c)
    #[arg(short = 'n', long = "add", conflicts_with = "expunge")]
    pub add: bool,

    /// Remove an entry or category
    #[arg(short = 'x', long = "expunge")]
    pub expunge: bool,

    /// Add a category instead of an entry
    #[arg(short = 'c', long = "category")]
    pub category: bool,

    /// Key of the new item
    #[arg(short = 'k', value_name = "KEY")]
    pub key: Option<String>,

    /// Description of the new item
    #[arg(short = 'd', value_name = "DESC")]
    pub desc: Option<String>,

    /// Value of the new entry
    #[arg(short = 'v', value_name = "VAL")]
    pub value: Option<String>,

    /// Output template; %s is replaced by the value
    #[arg(short = 'f', value_name = "FORMAT", default_value = "%s\n")]
    pub format: String,

    /// Write the value to this file instead of stdout
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(short = 'a', long = "append", requires = "output")]
    pub append: bool,

    /// List hidden entries from the start
    #[arg(long = "hidden")]
    pub hidden: bool,
}

/// What `dmx menu` was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Browse,
    Add,
    Expunge,
}

impl MenuArgs {
    pub fn action(&self) -> MenuAction {
        if self.add {
            MenuAction::Add
        } else if self.expunge {
            MenuAction::Expunge
        } else {
            MenuAction::Browse
        }
    }

    /// The item described by `-k`, `-d`, `-v` and `-c`
    pub fn new_item(&self) -> Result<MenuItem> {
        let key = non_empty(&self.key, "a key is required (-k)")?;
        let desc = non_empty(&self.desc, "a description is required (-d)")?;
        if self.category {
            return Ok(MenuItem::Category(Category::new(key, desc)));
        }
        let value = non_empty(&self.value, "a value is required (-v)")?;
        Ok(MenuItem::Entry(Entry::new(key, desc, value)))
    }

    pub fn template(&self) -> OutputTemplate {
        OutputTemplate::new(self.format.as_str())
    }

    pub fn target(&self) -> OutputTarget {
        match &self.output {
            Some(path) => OutputTarget::File {
                path: path.clone(),
                append: self.append,
            },
            None => OutputTarget::Stdout,
        }
    }
}

fn non_empty<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DmxError::invalid(message)),
    }
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Directory to start in
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Allow choosing a directory
    #[arg(short = 'd', long = "select-dir")]
    pub select_dir: bool,

    /// List hidden files from the start
    #[arg(short = 'H', long = "hidden")]
    pub hidden: bool,

    /// Sort names case-sensitively
    #[arg(short = 's', long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Output template; %s is replaced by the path
    #[arg(short = 'f', value_name = "FORMAT", default_value = "%s\n")]
    pub format: String,
}

impl FilesArgs {
    pub fn options(&self) -> ChooserOptions {
        ChooserOptions {
            select_dir: self.select_dir,
            show_hidden: self.hidden,
            case_sensitive: self.case_sensitive,
        }
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("action").required(true).multiple(false)))]
pub struct ClipArgs {
    /// Store the primary selection as a new clip
    #[arg(long, group = "action")]
    pub save: bool,

    /// Put a chosen clip on the clipboard
    #[arg(long, group = "action")]
    pub recall: bool,

    /// Delete a chosen clip
    #[arg(long, group = "action")]
    pub expunge: bool,

    /// Delete every clip
    #[arg(long, group = "action")]
    pub purge: bool,

    /// Clip directory
    #[arg(short = 'd', value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    Save,
    Recall,
    Expunge,
    Purge,
}

impl ClipArgs {
    pub fn action(&self) -> ClipAction {
        if self.save {
            ClipAction::Save
        } else if self.recall {
            ClipAction::Recall
        } else if self.expunge {
            ClipAction::Expunge
        } else {
            ClipAction::Purge
        }
    }
}

#[derive(Args, Debug)]
pub struct TodoArgs {
    /// Add an item with this title
    #[arg(short = 'a', long = "add", value_name = "TEXT", num_args = 1.., conflicts_with = "expunge")]
    pub add: Vec<String>,

    /// Remove a finished item
    #[arg(short = 'x', long = "expunge")]
    pub expunge: bool,

    /// View the item through the formatter
    #[arg(short = 'p', long = "pretty")]
    pub pretty: bool,

    /// Delete item files no longer on the list
    #[arg(short = 't', long = "tidy")]
    pub tidy: bool,
}

impl TodoArgs {
    /// Title for a new item, if adding
    pub fn title(&self) -> Option<String> {
        (!self.add.is_empty()).then(|| self.add.join(" "))
    }
}
