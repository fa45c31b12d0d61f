//! Core module - Items, line formatting and the picker protocol

pub mod format;
pub mod item;
pub mod selector;

pub use format::{
    collapse_whitespace, ensure_terminated, format_lines, join_lines, key_width, LINE_TERMINATOR,
};
pub use item::{item_order, key_len, sort_items, Choice, Item, Sentinel};
pub use selector::{
    resolve, select, Answer, Dmenu, Picker, PickerCall, PickerSettings, ScriptedPicker, Selection,
};
