//! File chooser (`dmx files`)
//!
//! Walks the live filesystem from a start directory. Cancelling climbs one
//! directory; only a cancel at `/` gives up.

use std::path::{Path, PathBuf};

use crate::core::Picker;
use crate::error::{DmxError, Result};
use crate::tree::{FsHierarchy, Navigator, Outcome, SelectMode};

/// File chooser behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChooserOptions {
    /// Offer "select current directory"
    pub select_dir: bool,
    /// Hidden files start out visible
    pub show_hidden: bool,
    /// Sort names case-sensitively
    pub case_sensitive: bool,
}

/// Let the user choose a path below the filesystem root, starting at `start`.
pub fn choose_path<P: Picker + ?Sized>(
    start: &Path,
    picker: &P,
    options: ChooserOptions,
) -> Result<Option<PathBuf>> {
    let start = std::path::absolute(start).map_err(|e| DmxError::enumeration(start, e))?;
    if !start.is_dir() {
        return Err(DmxError::enumeration(&start, "not a directory"));
    }

    let hierarchy = FsHierarchy::new(start).case_sensitive(options.case_sensitive);
    let mode = if options.select_dir {
        SelectMode::Any
    } else {
        SelectMode::Leaves
    };

    let outcome = Navigator::new(&hierarchy, mode)
        .show_hidden(options.show_hidden)
        .run(picker, "")?;

    Ok(match outcome {
        Outcome::Leaf { parent, node } => Some(parent.join(node.file_name())),
        Outcome::Container(dir) => Some(dir),
        Outcome::NoSelection => None,
    })
}
