//! dmx - dmenu-driven selection tools
//!
//! Items render to lines, a dmenu-compatible picker chooses one, and the
//! chosen line is resolved back to its item. On top of that sit a
//! hierarchical navigator and four clients: menus, a file chooser, a
//! clipboard manager and a to-do list.

pub mod app;
pub mod core;
pub mod error;
pub mod integrate;
pub mod tree;

pub use error::{DmxError, Result};
