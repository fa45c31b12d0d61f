//! Writing the chosen value
//!
//! Values go through a printf-like template (`%s` is the value, `%%` a
//! literal percent sign) to stdout or to a file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Exit codes for the application
///
/// - `SUCCESS` (0): something was chosen, or the user cancelled
/// - `ERROR` (1): any fatal error, including invalid arguments
pub mod exit_code {
    /// Normal exit, including a graceful cancel
    pub const SUCCESS: i32 = 0;
    /// Runtime error or invalid arguments
    pub const ERROR: i32 = 1;
}

/// Output template, default `%s\n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate(String);

impl Default for OutputTemplate {
    fn default() -> Self {
        Self("%s\n".to_string())
    }
}

impl OutputTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Substitute `value` for every `%s`
    pub fn render(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + value.len());
        let mut chars = self.0.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('s') => {
                    chars.next();
                    out.push_str(value);
                }
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                _ => out.push('%'),
            }
        }
        out
    }
}

/// Where the rendered value goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// Truncated (or appended to) file; an existing file keeps its mode
    File { path: PathBuf, append: bool },
}

/// Render `value` and write it to `target`
pub fn write_value(value: &str, template: &OutputTemplate, target: &OutputTarget) -> io::Result<()> {
    let rendered = template.render(value);
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()
        }
        OutputTarget::File { path, append } => write_to_file(path, *append, rendered.as_bytes()),
    }
}

fn write_to_file(path: &Path, append: bool, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()
}
