//! Prophet - command-line client for the Prophet CMDB backend.
//!
//! The library is split so integration tests can drive it without a
//! terminal or a live server:
//!
//! - [`api`]: typed endpoints over the `{code, data, message}` envelope
//! - [`state`]: session, locale and settings stores
//! - [`router`]: route table and authentication guard
//! - [`cli`]: argument parsing and command handlers

pub mod adapters;
pub mod api;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod router;
pub mod state;
pub mod traits;
