//! Terminal output for CLI commands: headers, status lines and tables.

mod lines;
mod table;

pub use lines::*;
pub use table::Table;
