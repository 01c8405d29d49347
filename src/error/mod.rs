//! Error handling for the prophet client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: transport, API, auth, storage
//! - **Unified Error Type**: [`ProphetError`] consolidates all of them
//! - **Error Context**: operation and resource attached by callers
//!
//! # Error Categories
//!
//! | Category | Source | Retryable |
//! |----------|--------|-----------|
//! | Network | Backend unreachable, timeout | Yes |
//! | Auth | 401/403, missing token | No |
//! | Server | 5xx, malformed response | Yes |
//! | Client | Other rejected requests | No |
//! | Validation | Local graph checks | No |
//! | Storage | Token/preference file | No |
//! | Configuration | Base URL, data dir | No |

mod api;
mod auth;
mod category;
mod context;
mod network;
mod prophet_error;
mod result;
mod storage;

pub use api::ApiError;
pub use auth::AuthError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use prophet_error::ProphetError;
pub use result::{ProphetResult, ResultExt};
pub use storage::StorageError;
