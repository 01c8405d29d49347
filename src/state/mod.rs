//! Client-side state containers.
//!
//! - [`AuthStore`]: session token and current user
//! - [`LocaleStore`]: interface language
//! - [`SettingsStore`]: list page size
//! - [`History`]: where navigation has taken the user
//!
//! All of them are built once at startup and shared by reference.

pub mod auth;
pub mod history;
pub mod locale;
pub mod settings;
pub mod token;

pub use auth::{AuthPhase, AuthStore};
pub use history::{History, HistoryEntry};
pub use locale::{Locale, LocaleStore};
pub use settings::{SettingsStore, DEFAULT_PAGE_SIZE};
pub use token::SessionToken;
