//! Simple line-based CLI output utilities.

use std::io::{self, Write};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print a section header.
///
/// ```text
/// HOSTS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a status line.
///
/// ```text
///   ✓ Logged in as admin
/// ```
pub fn print_status(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print `key: value` pairs with the keys padded to one width.
pub fn print_fields(fields: &[(&str, String)]) {
    let width = fields
        .iter()
        .map(|(k, _)| unicode_width::UnicodeWidthStr::width(*k))
        .max()
        .unwrap_or(0);
    for (key, value) in fields {
        let pad = width - unicode_width::UnicodeWidthStr::width(*key);
        println!("  {}{}  {}", key, " ".repeat(pad), value);
    }
}

/// Overwrite the current line with a progress message.
pub fn print_progress(spinner_char: char, message: &str) {
    print!("\r\x1b[2K  {} {}", spinner_char, message);
    io::stdout().flush().ok();
}

/// Finish a progress line with a final status.
pub fn print_progress_done(icon: &str, message: &str) {
    print!("\r\x1b[2K");
    print_status(icon, message);
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

/// Spinner characters for polling loops.
pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
