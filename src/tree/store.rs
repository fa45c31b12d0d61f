//! Menu document storage
//!
//! A menu file is a stream of JSON values, one per top-level item, written
//! pretty-printed and newline-separated. It is read whole at startup and, after
//! a mutation, rewritten whole in place with its original permissions.

use std::fs::{self, File, Permissions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::menu::{Category, MenuItem};
use crate::error::{DmxError, Result};

/// A loaded menu file
#[derive(Debug)]
pub struct MenuDocument {
    path: PathBuf,
    permissions: Permissions,
    root: Category,
}

impl MenuDocument {
    /// Read and parse the whole document at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DmxError::enumeration(path, e))?;
        let permissions = file
            .metadata()
            .map_err(|e| DmxError::enumeration(path, e))?
            .permissions();

        let items = serde_json::Deserializer::from_reader(BufReader::new(file))
            .into_iter::<MenuItem>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DmxError::enumeration(path, e))?;

        debug!(path = %path.display(), items = items.len(), "menu loaded");
        Ok(Self {
            path: path.to_path_buf(),
            permissions,
            root: Category::base(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Category {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Category {
        &mut self.root
    }

    /// Serialize the document: every top-level item, pretty, one per block
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for item in self.root.children() {
            serde_json::to_writer_pretty(&mut out, item)
                .map_err(|e| DmxError::storage(&self.path, e))?;
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Rewrite the backing file with the current tree, sorted.
    ///
    /// Goes through a temporary file in the same directory, so a failure
    /// leaves the original untouched. A symlinked path is followed and the
    /// link target is replaced, leaving the link itself in place.
    pub fn save(&mut self) -> Result<()> {
        self.root.sort_recursive();
        let bytes = self.to_bytes()?;

        let target = fs::canonicalize(&self.path).map_err(|e| DmxError::storage(&self.path, e))?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DmxError::storage(&self.path, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| DmxError::storage(&self.path, e))?;
        fs::set_permissions(tmp.path(), self.permissions.clone())
            .map_err(|e| DmxError::storage(&self.path, e))?;
        tmp.persist(&target)
            .map_err(|e| DmxError::storage(&self.path, e.error))?;

        info!(path = %self.path.display(), target = %target.display(), "menu rewritten");
        Ok(())
    }
}
