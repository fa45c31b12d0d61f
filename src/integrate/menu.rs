//! Hierarchical menu (`dmx menu`)
//!
//! Browse a menu document for an entry's value, add an entry or category
//! somewhere in it, or remove one. Mutations rewrite the whole document.

use tracing::info;

use crate::core::Picker;
use crate::error::{DmxError, Result};
use crate::tree::{
    Category, Entry, MenuDocument, MenuHierarchy, MenuItem, MenuNode, Navigator, Outcome,
    SelectMode,
};

/// How menus are displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptions {
    /// Prompt at the top level; deeper levels append category keys
    pub prompt: String,
    pub separator: String,
    pub hidden_marker: char,
    /// Whether hidden entries start out visible
    pub show_hidden: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            separator: "/".to_string(),
            hidden_marker: '.',
            show_hidden: false,
        }
    }
}

impl MenuOptions {
    fn navigate<P: Picker + ?Sized>(
        &self,
        root: &Category,
        picker: &P,
        mode: SelectMode,
    ) -> Result<Outcome<Vec<usize>, MenuNode>> {
        let hierarchy =
            MenuHierarchy::new(root, self.separator.as_str()).hidden_marker(self.hidden_marker);
        Navigator::new(&hierarchy, mode)
            .show_hidden(self.show_hidden)
            .hidden_marker(self.hidden_marker)
            .run(picker, &self.prompt)
    }
}

/// Let the user pick an entry. `None` when they cancel out.
pub fn browse<P: Picker + ?Sized>(
    doc: &MenuDocument,
    picker: &P,
    options: &MenuOptions,
) -> Result<Option<Entry>> {
    match options.navigate(doc.root(), picker, SelectMode::Leaves)? {
        Outcome::Leaf { parent, node } => {
            let item = doc
                .root()
                .get(&parent)
                .and_then(|cat| cat.children().get(node.index()));
            match item {
                Some(MenuItem::Entry(entry)) => Ok(Some(entry.clone())),
                _ => Err(DmxError::invalid(format!(
                    "'{}' is no longer an entry",
                    node.token()
                ))),
            }
        }
        Outcome::Container(_) => Err(DmxError::invalid("a category was chosen while browsing")),
        Outcome::NoSelection => Ok(None),
    }
}

/// Let the user pick a category and add `item` to it, then rewrite the file.
///
/// Returns whether anything was added.
pub fn add<P: Picker + ?Sized>(
    doc: &mut MenuDocument,
    picker: &P,
    options: &MenuOptions,
    item: MenuItem,
) -> Result<bool> {
    let location = match options.navigate(doc.root(), picker, SelectMode::Containers)? {
        Outcome::Container(location) => location,
        Outcome::Leaf { .. } => {
            return Err(DmxError::invalid("an entry was chosen as insertion point"))
        }
        Outcome::NoSelection => return Ok(false),
    };

    let token = item.token().to_string();
    doc.root_mut()
        .get_mut(&location)
        .ok_or_else(|| DmxError::invalid(format!("no category at {:?}", location)))?
        .insert(item)?;
    doc.save()?;

    info!(token = %token, location = ?location, "menu item added");
    Ok(true)
}

/// Let the user pick an entry or category and remove it, then rewrite the file.
pub fn expunge<P: Picker + ?Sized>(
    doc: &mut MenuDocument,
    picker: &P,
    options: &MenuOptions,
) -> Result<Option<MenuItem>> {
    let (parent, index) = match options.navigate(doc.root(), picker, SelectMode::Any)? {
        Outcome::Leaf { parent, node } => (parent, node.index()),
        Outcome::Container(location) => match location.split_last() {
            Some((&index, parent)) => (parent.to_vec(), index),
            None => return Err(DmxError::invalid("the base category cannot be removed")),
        },
        Outcome::NoSelection => return Ok(None),
    };

    let removed = doc
        .root_mut()
        .remove(&parent, index)
        .ok_or_else(|| DmxError::invalid(format!("nothing at {:?}/{}", parent, index)))?;
    doc.save()?;

    info!(token = %removed.token(), "menu item removed");
    Ok(Some(removed))
}
