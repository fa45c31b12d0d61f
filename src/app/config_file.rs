//! Configuration file loading and parsing
//!
//! Candidates, in order: every `--config` path, `~/.config/dmx.toml`, then
//! `/usr/share/dmx.toml`. The first one that exists is the only one read.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::PickerSettings;
use crate::error::{DmxError, Result};

/// System-wide configuration file
pub const SYSTEM_CONFIG_PATH: &str = "/usr/share/dmx.toml";

/// Main configuration file structure
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Picker executable and styling
    pub picker: PickerSettings,
    /// Hierarchical menu settings
    pub menu: MenuConfig,
    /// Clipboard manager settings
    pub clip: ClipConfig,
    /// To-do list settings
    pub todo: TodoConfig,
}

/// Hierarchical menu settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Appended to category keys and shown in the "choose category" line
    pub separator: String,
    /// Entries whose key starts with this are hidden
    pub hidden_marker: char,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            separator: "/".to_string(),
            hidden_marker: '.',
        }
    }
}

/// Clipboard manager settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Directory holding numbered clip files
    pub dir: PathBuf,
    /// Bytes of each clip read for its preview
    pub max_preview: usize,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/tmp/fdmcm"),
            max_preview: 512,
        }
    }
}

/// To-do list settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Directory holding `list.txt` and the item files
    pub dir: PathBuf,
    /// Where formatted views are written
    pub temp_dir: PathBuf,
    /// Editor for new items; empty reads the body from stdin
    pub editor: String,
    /// Converts an item to HTML (stdin to stdout)
    pub formatter: String,
    /// Opens the formatted file
    pub viewer: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            dir: dirs::home_dir()
                .map(|home| home.join(".dtodo"))
                .unwrap_or_else(|| PathBuf::from(".dtodo")),
            temp_dir: env::temp_dir(),
            editor: env::var("EDITOR").unwrap_or_default(),
            formatter: "pandoc".to_string(),
            viewer: "xdg-open".to_string(),
        }
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl ConfigFile {
    /// Get the user config file path (~/.config/dmx.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dmx.toml"))
    }

    /// Candidate files in resolution order
    pub fn candidates(overrides: &[PathBuf]) -> Vec<PathBuf> {
        let mut paths = overrides.to_vec();
        paths.extend(Self::user_config_path());
        paths.push(PathBuf::from(SYSTEM_CONFIG_PATH));
        paths
    }

    /// First candidate that exists
    pub fn resolve(candidates: &[PathBuf]) -> Option<&PathBuf> {
        candidates.iter().find(|path| path.exists())
    }

    /// Load configuration, falling back to defaults.
    ///
    /// Problems with the chosen file are logged, never fatal.
    pub fn load(overrides: &[PathBuf]) -> Self {
        let candidates = Self::candidates(overrides);
        let Some(path) = Self::resolve(&candidates) else {
            debug!(?candidates, "no config file found, using defaults");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(config) => {
                debug!(path = %path.display(), "config loaded");
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DmxError::config(path, e))?;
        let mut config: ConfigFile =
            toml::from_str(&content).map_err(|e| DmxError::config(path, e))?;
        config.clip.dir = expand_home(&config.clip.dir);
        config.todo.dir = expand_home(&config.todo.dir);
        config.todo.temp_dir = expand_home(&config.todo.temp_dir);
        Ok(config)
    }
}
