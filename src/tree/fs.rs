//! Filesystem hierarchy
//!
//! Directories are containers, everything else is a leaf. Each visit re-reads
//! the directory, so changes made while the picker is open show up on the
//! next round.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use super::navigator::{Frame, Hierarchy, Node};
use crate::core::{Item, Sentinel};
use crate::error::{DmxError, Result};

/// One directory entry
#[derive(Debug, Clone, PartialEq)]
pub struct DirNode {
    file_name: OsString,
    name: String,
    is_dir: bool,
    sort_key: String,
}

impl DirNode {
    pub fn new(file_name: OsString, is_dir: bool, case_sensitive: bool) -> Self {
        let name = file_name.to_string_lossy().into_owned();
        let sort_key = if case_sensitive {
            name.clone()
        } else {
            name.to_lowercase()
        };
        Self {
            file_name,
            name,
            is_dir,
            sort_key,
        }
    }

    pub fn file_name(&self) -> &OsString {
        &self.file_name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

impl Item for DirNode {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn menu_line(&self, _key_width: usize) -> Vec<u8> {
        if self.is_dir {
            format!("{}{}", self.name, MAIN_SEPARATOR).into_bytes()
        } else {
            self.name.clone().into_bytes()
        }
    }

    fn sorts_before(&self, other: &Self) -> bool {
        if self.is_dir == other.is_dir {
            self.sort_key < other.sort_key
        } else {
            self.is_dir
        }
    }
}

impl Node for DirNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_container(&self) -> bool {
        self.is_dir
    }
}

/// Live view of the filesystem below `/`, opened at a start directory
pub struct FsHierarchy {
    start: PathBuf,
    case_sensitive: bool,
}

impl FsHierarchy {
    /// `start` should be an absolute directory path
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn start_dir(&self) -> &Path {
        &self.start
    }
}

/// Frames from the filesystem root down to `dir`, each prompted with its path
pub fn ancestry(dir: &Path) -> Vec<Frame<PathBuf>> {
    let mut frames: Vec<Frame<PathBuf>> = dir
        .ancestors()
        .map(|p| Frame::new(p.to_path_buf(), p.display().to_string()))
        .collect();
    frames.reverse();
    frames
}

impl Hierarchy for FsHierarchy {
    type Node = DirNode;
    type Location = PathBuf;

    fn start(&self, _prompt: &str) -> Vec<Frame<PathBuf>> {
        ancestry(&self.start)
    }

    fn children(&self, at: &PathBuf) -> Result<Vec<DirNode>> {
        let entries = fs::read_dir(at).map_err(|e| DmxError::enumeration(at, e))?;
        let mut nodes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DmxError::enumeration(at, e))?;
            let file_type = entry.file_type().map_err(|e| DmxError::enumeration(at, e))?;
            // Symlinks count as directories when they resolve to one
            let is_dir = file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir());
            nodes.push(DirNode::new(entry.file_name(), is_dir, self.case_sensitive));
        }
        Ok(nodes)
    }

    fn descend(&self, at: &PathBuf, child: &DirNode) -> PathBuf {
        at.join(&child.file_name)
    }

    fn child_prompt(&self, _prompt: &str, _child: &DirNode, location: &PathBuf) -> String {
        location.display().to_string()
    }

    fn sentinel_line(&self, sentinel: Sentinel, show_hidden: bool) -> String {
        match sentinel {
            Sentinel::SelectCurrent => format!("{} [ select current directory ]", MAIN_SEPARATOR),
            Sentinel::ToggleHidden if show_hidden => ". [ hide hidden files ]".to_string(),
            Sentinel::ToggleHidden => ". [ show hidden files ]".to_string(),
        }
    }
}
