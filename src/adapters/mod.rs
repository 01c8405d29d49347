//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStorage`] - JSON file key-value storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryStorage`] - In-memory storage

pub mod file_storage;
pub mod mock;
pub mod reqwest_http;

pub use file_storage::FileStorage;
pub use mock::{InMemoryStorage, MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
