//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and request recording
//! - [`InMemoryStorage`] - In-memory key-value storage

pub mod http;
pub mod storage;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use storage::InMemoryStorage;
