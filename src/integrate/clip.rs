//! Clipboard manager (`dmx clip`)
//!
//! Keeps clipboard snapshots as numbered files in a directory. `save` stores
//! the primary selection, `recall` copies a chosen snapshot to the clipboard.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};

use crate::core::{collapse_whitespace, select, sort_items, Item, Picker, Selection};
use crate::error::{DmxError, Result};

/// One stored snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub number: u64,
    pub path: PathBuf,
    pub preview: String,
}

impl Item for Clip {
    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.number.to_string())
    }

    fn menu_line(&self, key_width: usize) -> Vec<u8> {
        format!("{:0key_width$}    {}\n", self.number, self.preview).into_bytes()
    }

    /// Newest first
    fn sorts_before(&self, other: &Self) -> bool {
        self.number > other.number
    }
}

/// Source and sink for clipboard text
pub trait ClipboardAccess {
    /// Current primary selection (or clipboard where there is none)
    fn read_selection(&mut self) -> Result<String>;
    /// Put text on the clipboard
    fn write_clipboard(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| DmxError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
impl ClipboardAccess for SystemClipboard {
    fn read_selection(&mut self) -> Result<String> {
        use arboard::{GetExtLinux, LinuxClipboardKind};
        self.inner
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
            .map_err(|e| DmxError::Clipboard(e.to_string()))
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;
        // Stay alive until another program takes ownership of the clipboard
        self.inner
            .set()
            .wait()
            .text(text.to_string())
            .map_err(|e| DmxError::Clipboard(e.to_string()))
    }
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
impl ClipboardAccess for SystemClipboard {
    fn read_selection(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .map_err(|e| DmxError::Clipboard(e.to_string()))
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| DmxError::Clipboard(e.to_string()))
    }
}

/// Directory of numbered clip files
#[derive(Debug, Clone)]
pub struct ClipStore {
    dir: PathBuf,
    max_preview: usize,
}

impl ClipStore {
    /// Open the store, creating its directory if needed
    pub fn open(dir: impl Into<PathBuf>, max_preview: usize) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| DmxError::storage(&dir, e))?;
        Ok(Self { dir, max_preview })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn preview(&self, path: &Path) -> Result<String> {
        let mut buf = Vec::with_capacity(self.max_preview);
        File::open(path)
            .and_then(|f| f.take(self.max_preview as u64).read_to_end(&mut buf))
            .map_err(|e| DmxError::enumeration(path, e))?;
        Ok(collapse_whitespace(&String::from_utf8_lossy(&buf)))
    }

    /// Every stored clip, newest first
    pub fn list(&self) -> Result<Vec<Clip>> {
        let numeric = Regex::new(r"^\d+$").map_err(|e| DmxError::invalid(e.to_string()))?;
        let entries = fs::read_dir(&self.dir).map_err(|e| DmxError::enumeration(&self.dir, e))?;

        let mut clips = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DmxError::enumeration(&self.dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_file || !numeric.is_match(&name) {
                continue;
            }
            let number = match name.parse::<u64>() {
                Ok(n) => n,
                Err(e) => {
                    warn!(name = %name, "skipping clip file: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let preview = self.preview(&path)?;
            clips.push(Clip {
                number,
                path,
                preview,
            });
        }

        sort_items(&mut clips);
        Ok(clips)
    }

    /// Store `text` under the next free number
    pub fn save(&self, text: &str) -> Result<Clip> {
        let number = match self.list()?.first() {
            Some(newest) => newest.number.checked_add(1).ok_or_else(|| {
                DmxError::invalid(format!("clip number {} is the largest possible", newest.number))
            })?,
            None => 0,
        };
        let path = self.dir.join(number.to_string());

        let mut file = File::create(&path).map_err(|e| DmxError::storage(&path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| DmxError::storage(&path, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o644)) {
                warn!(path = %path.display(), "unable to set clip permissions: {}", e);
            }
        }

        info!(number, "clip saved");
        Ok(Clip {
            number,
            path,
            preview: collapse_whitespace(text),
        })
    }

    /// Read a clip's full contents
    pub fn read(&self, clip: &Clip) -> Result<String> {
        fs::read_to_string(&clip.path).map_err(|e| DmxError::enumeration(&clip.path, e))
    }

    pub fn remove(&self, clip: &Clip) -> Result<()> {
        fs::remove_file(&clip.path).map_err(|e| DmxError::storage(&clip.path, e))
    }

    /// Remove every clip. Failures are logged; returns how many were removed.
    pub fn purge(&self) -> Result<usize> {
        let mut removed = 0;
        for clip in self.list()? {
            match self.remove(&clip) {
                Ok(()) => removed += 1,
                Err(e) => warn!("{}", e),
            }
        }
        Ok(removed)
    }

    /// Let the user pick a clip
    pub fn choose<P: Picker + ?Sized>(&self, picker: &P, prompt: &str) -> Result<Option<Clip>> {
        let clips = self.list()?;
        Ok(match select(picker, prompt, &clips)? {
            Selection::Selected(clip) => Some(clip.clone()),
            Selection::NoSelection => None,
        })
    }
}

/// Save the current selection as a new clip
pub fn save_selection<C: ClipboardAccess + ?Sized>(store: &ClipStore, clipboard: &mut C) -> Result<Clip> {
    let text = clipboard.read_selection()?;
    store.save(&text)
}

/// Pick a clip and put it on the clipboard. `None` when cancelled.
pub fn recall<P, C>(store: &ClipStore, picker: &P, clipboard: &mut C) -> Result<Option<Clip>>
where
    P: Picker + ?Sized,
    C: ClipboardAccess + ?Sized,
{
    let Some(clip) = store.choose(picker, "R>")? else {
        return Ok(None);
    };
    clipboard.write_clipboard(&store.read(&clip)?)?;
    Ok(Some(clip))
}

/// Pick a clip and delete it. `None` when cancelled.
pub fn expunge<P: Picker + ?Sized>(store: &ClipStore, picker: &P) -> Result<Option<Clip>> {
    let Some(clip) = store.choose(picker, "X>")? else {
        return Ok(None);
    };
    store.remove(&clip)?;
    info!(number = clip.number, "clip removed");
    Ok(Some(clip))
}
