//! Integrate module - The dmx clients
//!
//! Each client pairs a data source with the picker:
//! - Menu: hierarchical JSON menus (`dmx menu`)
//! - Files: filesystem chooser (`dmx files`)
//! - Clip: clipboard snapshots (`dmx clip`)
//! - Todo: to-do list (`dmx todo`)

pub mod clip;
pub mod files;
pub mod menu;
pub mod output;
pub mod todo;

pub use clip::{Clip, ClipStore, ClipboardAccess, SystemClipboard};
pub use files::{choose_path, ChooserOptions};
pub use menu::MenuOptions;
pub use output::{exit_code, write_value, OutputTarget, OutputTemplate};
pub use todo::{TodoItem, TodoList};
