//! Logging utilities with colored module prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "processing {} mods", count);
//! // prints: [build] processing 12 mods
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_yellow().bold(),
        "index" => prefix.bright_blue().bold(),
        _ => prefix.bright_green().bold(),
    }
}
