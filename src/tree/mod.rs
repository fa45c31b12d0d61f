//! Tree module - Hierarchies and the navigator that walks them

pub mod fs;
pub mod menu;
pub mod navigator;
pub mod store;

pub use fs::{DirNode, FsHierarchy};
pub use menu::{Category, Entry, MenuHierarchy, MenuItem, MenuNode};
pub use navigator::{Frame, Hierarchy, Navigator, Node, Outcome, SelectMode};
pub use store::MenuDocument;
