//! Version command for the prophet CLI.

/// The current version of prophet, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the version string.
pub fn handle_version_command() {
    println!("prophet {}", VERSION);
}
