//! Application module
//!
//! Command-line parsing, the configuration file and logging setup.

pub mod config;
pub mod config_file;
mod logging;

pub use config::{ClipAction, Cli, Command, MenuAction};
pub use config_file::ConfigFile;
pub use logging::{init_tracing, LOG_ENV};
